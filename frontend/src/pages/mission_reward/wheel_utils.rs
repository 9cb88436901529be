use yew::prelude::*;
use web_sys::window;
use shared::reward_roulette::{ErrorKind, SessionView, SpinPhase};

// Get auth token from storage
pub fn get_auth_token() -> Option<String> {
    window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|s| s.get_item("token").ok().flatten())
        .or_else(|| window()
            .and_then(|w| w.session_storage().ok().flatten())
            .and_then(|s| s.get_item("token").ok().flatten()))
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BannerTone {
    Win,
    PriorPrize,
    Pending,
    Conflict,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ResultBanner {
    pub tone: BannerTone,
    pub message: String,
}

/// What the result area should say for a session. A failed claim never reads
/// like a win.
pub fn result_banner(view: &SessionView) -> Option<ResultBanner> {
    if view.already_claimed {
        let message = match &view.prior_prize {
            Some(name) => format!("You already received: {}", name),
            None => "You already received the reward for this mission set".to_string(),
        };
        return Some(ResultBanner { tone: BannerTone::PriorPrize, message });
    }

    match view.phase {
        SpinPhase::Resolving => Some(ResultBanner {
            tone: BannerTone::Pending,
            message: "Confirming your prize...".to_string(),
        }),
        SpinPhase::Settled => view.result.as_ref().map(|result| ResultBanner {
            tone: BannerTone::Win,
            message: format!("You won {}!", result.option_name),
        }),
        SpinPhase::Failed => view.failure.as_ref().map(|err| ResultBanner {
            tone: if err.kind() == ErrorKind::AlreadyClaimed {
                BannerTone::Conflict
            } else {
                BannerTone::Error
            },
            message: err.user_message(),
        }),
        SpinPhase::Idle | SpinPhase::Spinning => None,
    }
}

// Result display component
#[derive(Properties, PartialEq)]
pub struct ResultDisplayProps {
    pub banner: Option<ResultBanner>,
}

#[function_component(ResultDisplay)]
pub fn result_display(props: &ResultDisplayProps) -> Html {
    let Some(banner) = &props.banner else {
        return html! {};
    };

    let (gradient_classes, animation_class) = match banner.tone {
        BannerTone::Win => ("from-orange-400 to-orange-600 border-orange-300", "animate-bounce"),
        BannerTone::PriorPrize => ("from-violet-400 to-violet-600 border-violet-300", ""),
        BannerTone::Pending => ("from-blue-400 to-blue-600 border-blue-300", "animate-pulse"),
        BannerTone::Conflict => ("from-yellow-500 to-amber-600 border-yellow-300", ""),
        BannerTone::Error => ("from-red-500 to-red-700 border-red-300", ""),
    };

    html! {
        <div class="mt-8 mb-4 flex flex-col items-center justify-center">
            <div class={classes!(
                "flex",
                "items-center",
                "justify-center",
                "text-center",
                "px-6",
                "py-4",
                "rounded-xl",
                "bg-gradient-to-r",
                "text-white",
                "font-bold",
                "text-lg",
                "shadow-lg",
                "border-2",
                "transition-all",
                "duration-500",
                animation_class,
                gradient_classes
            )}>
                <span>{&banner.message}</span>
            </div>
        </div>
    }
}

/// Spin button caption. Only a granted reward reads as claimed; a failed
/// claim says the spin did not count.
pub fn spin_button_label(phase: SpinPhase, can_spin: bool) -> &'static str {
    match phase {
        SpinPhase::Spinning => "Spinning...",
        SpinPhase::Resolving => "Confirming...",
        SpinPhase::Settled => "Reward claimed",
        SpinPhase::Failed => "Spin not counted",
        SpinPhase::Idle if can_spin => "Spin for your reward",
        SpinPhase::Idle => "Wheel unavailable",
    }
}

// Spin button component
#[derive(Properties, PartialEq)]
pub struct SpinButtonProps {
    pub phase: SpinPhase,
    pub can_spin: bool,
    pub onclick: Callback<MouseEvent>,
}

#[function_component(SpinButton)]
pub fn spin_button(props: &SpinButtonProps) -> Html {
    let button_text = spin_button_label(props.phase, props.can_spin);
    let is_spinning = props.phase == SpinPhase::Spinning;
    let is_disabled = !props.can_spin;

    let button_class = if is_disabled {
        "bg-gradient-to-r from-gray-400 to-gray-500 opacity-75 cursor-not-allowed text-white"
    } else {
        "bg-gradient-to-r from-yellow-400 to-orange-500 hover:from-yellow-500 hover:to-orange-600 text-white shadow-lg hover:shadow-xl transform hover:-translate-y-0.5 active:translate-y-0"
    };

    let spin_icon_class = if is_spinning {
        "inline-block mr-2 animate-spin"
    } else {
        "hidden"
    };

    html! {
        <div class={classes!("relative", "overflow-hidden", "rounded-full", "w-full", button_class)}>
            <button
                onclick={props.onclick.clone()}
                disabled={is_disabled}
                class={classes!(
                    "relative",
                    "w-full",
                    "px-8",
                    "py-4",
                    "font-bold",
                    "text-lg",
                    "transition-all",
                    "duration-300",
                    "focus:outline-none",
                    "focus:ring-4",
                    "focus:ring-yellow-300",
                    "bg-transparent",
                )}
            >
                <div class="flex items-center justify-center relative z-10">
                    <svg class={spin_icon_class} xmlns="http://www.w3.org/2000/svg" width="20" height="20" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2">
                        <circle cx="12" cy="12" r="10" />
                        <path d="M12 6v6l4 2" />
                    </svg>
                    <span>{button_text}</span>
                </div>
            </button>
        </div>
    }
}
