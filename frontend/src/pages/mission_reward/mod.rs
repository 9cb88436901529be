mod frame_ticker;
mod http_gateway;
mod wheel_canvas;
mod wheel_utils;

use std::cell::Cell;
use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use shared::constants::MIN_LOADING_MS;
use shared::reward_roulette::{
    draw_spin_angle, run_spin, share, SessionView, SharedSession, SpinEvent, SpinOutcome,
    SpinPhase, SpinSession, SpinSettings,
};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::styles;
use frame_ticker::RafTicker;
use http_gateway::HttpClaimGateway;
use wheel_canvas::WheelCanvas;
use wheel_utils::{result_banner, ResultDisplay, SpinButton};

#[derive(Clone, PartialEq)]
enum DialogState {
    Loading,
    LoadFailed(String),
    Ready(SessionView),
}

#[derive(Properties, PartialEq)]
pub struct RewardRouletteDialogProps {
    pub mission_set_id: i64,
    pub on_close: Callback<()>,
}

/// Modal wheel for one mission set. Each mount owns a fresh spin session that is
/// closed when the dialog unmounts.
#[function_component(RewardRouletteDialog)]
pub fn reward_roulette_dialog(props: &RewardRouletteDialogProps) -> Html {
    let session_slot = use_mut_ref(|| None::<SharedSession>);
    let dialog_state = use_state(|| DialogState::Loading);
    let rotation = use_state(|| 0.0_f64);

    // Open the session on mount, close it on unmount
    {
        let session_slot = session_slot.clone();
        let dialog_state = dialog_state.clone();
        let rotation = rotation.clone();

        use_effect_with(props.mission_set_id, move |mission_set_id| {
            let mission_set_id = *mission_set_id;
            let mounted = Rc::new(Cell::new(true));

            {
                let mounted = mounted.clone();
                let session_slot = session_slot.clone();
                spawn_local(async move {
                    let gateway = HttpClaimGateway::default();
                    // Keep the loading state visible for a moment
                    let (opened, _) = futures::join!(
                        SpinSession::open(&gateway, mission_set_id, SpinSettings::default()),
                        TimeoutFuture::new(MIN_LOADING_MS)
                    );

                    if !mounted.get() {
                        return;
                    }

                    match opened {
                        Ok(session) => {
                            let view = session.snapshot();
                            rotation.set(view.base_angle);
                            *session_slot.borrow_mut() = Some(share(session));
                            dialog_state.set(DialogState::Ready(view));
                        }
                        Err(e) => {
                            log::warn!("Could not open reward wheel for mission set {}: {}", mission_set_id, e);
                            dialog_state.set(DialogState::LoadFailed(e.user_message()));
                        }
                    }
                });
            }

            move || {
                mounted.set(false);
                if let Some(session) = session_slot.borrow_mut().take() {
                    session.borrow_mut().close();
                }
            }
        });
    }

    let on_spin = {
        let session_slot = session_slot.clone();
        let dialog_state = dialog_state.clone();
        let rotation = rotation.clone();

        Callback::from(move |_: MouseEvent| {
            let Some(session) = session_slot.borrow().clone() else {
                return;
            };
            if !session.borrow().can_spin() {
                return;
            }

            let spin_angle = draw_spin_angle(&mut rand::thread_rng(), &session.borrow().settings());
            let liveness = session.borrow().liveness();
            let dialog_state = dialog_state.clone();
            let rotation = rotation.clone();

            spawn_local(async move {
                let gateway = HttpClaimGateway::default();
                let ticker = RafTicker::new(liveness.clone());

                let on_event = {
                    let session = session.clone();
                    let dialog_state = dialog_state.clone();
                    let mut first_frame = true;
                    move |event: SpinEvent| match event {
                        SpinEvent::Frame(angle) => {
                            rotation.set(angle);
                            if first_frame {
                                first_frame = false;
                                dialog_state.set(DialogState::Ready(session.borrow().snapshot()));
                            }
                        }
                        // Show the pending banner while the claim is in flight
                        SpinEvent::Landed(_) => {
                            dialog_state.set(DialogState::Ready(session.borrow().snapshot()));
                        }
                    }
                };

                let outcome = run_spin(&session, &gateway, ticker, spin_angle, on_event).await;

                // Nothing to update once the dialog is gone
                if !liveness.is_alive() {
                    return;
                }
                if let SpinOutcome::Rejected(reason) = &outcome {
                    log::debug!("Spin click ignored: {:?}", reason);
                }
                dialog_state.set(DialogState::Ready(session.borrow().snapshot()));
            });
        })
    };

    let on_close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    let body = match &*dialog_state {
        DialogState::Loading => html! {
            <div class="flex flex-col items-center justify-center py-16">
                <div class={classes!(styles::LOADING_SPINNER, "rounded-full", "border-2", "border-current", "border-t-transparent")}></div>
                <span class={classes!(styles::TEXT_SMALL, "mt-3")}>{"Loading rewards..."}</span>
            </div>
        },
        DialogState::LoadFailed(message) => html! {
            <div class={styles::ALERT_ERROR}>{message}</div>
        },
        DialogState::Ready(view) => {
            let highlight = view.resolved.as_ref().map(|resolved| resolved.index);
            html! {
                <>
                    <div class="relative mx-auto mb-8 flex justify-center items-center">
                        <div class="w-full max-w-[450px] mx-auto">
                            <WheelCanvas
                                rotation={*rotation}
                                is_spinning={view.phase == SpinPhase::Spinning}
                                option_names={view.option_names.clone()}
                                highlight={highlight}
                            />
                        </div>
                    </div>
                    if !view.already_claimed {
                        <div class="flex justify-center mt-4">
                            <div class="w-full max-w-[300px]">
                                <SpinButton
                                    phase={view.phase}
                                    can_spin={view.can_spin}
                                    onclick={on_spin}
                                />
                            </div>
                        </div>
                    }
                    <ResultDisplay banner={result_banner(view)} />
                </>
            }
        }
    };

    html! {
        <div class={styles::MODAL_BACKDROP}>
            <div class={styles::MODAL_PANEL}>
                <div class="flex items-center justify-between mb-6">
                    <h2 class={styles::TEXT_H2}>
                        <span class="bg-clip-text text-transparent bg-gradient-to-r from-yellow-400 to-orange-500">{"Mission Reward"}</span>
                    </h2>
                    <button class={styles::BUTTON_ICON} onclick={on_close} aria-label="Close">
                        {"✕"}
                    </button>
                </div>
                {body}
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct MissionRewardPageProps {
    pub mission_set_id: i64,
}

#[function_component(MissionRewardPage)]
pub fn mission_reward_page(props: &MissionRewardPageProps) -> Html {
    let is_open = use_state(|| false);
    // A new key per opening gives every dialog its own session
    let open_count = use_state(|| 0u32);

    let open = {
        let is_open = is_open.clone();
        let open_count = open_count.clone();
        Callback::from(move |_: MouseEvent| {
            open_count.set(*open_count + 1);
            is_open.set(true);
        })
    };

    let close = {
        let is_open = is_open.clone();
        Callback::from(move |_: ()| is_open.set(false))
    };

    html! {
        <div class={styles::CONTAINER_LG}>
            <div class={classes!(styles::CARD, "max-w-lg", "mx-auto", "text-center", "space-y-4")}>
                <h1 class={styles::TEXT_H2}>{format!("Mission set #{}", props.mission_set_id)}</h1>
                <p class={styles::TEXT_BODY}>{"Every mission in this set is complete. Spin the wheel to pick your reward."}</p>
                <button class={styles::BUTTON_PRIMARY} onclick={open}>{"Open reward wheel"}</button>
            </div>
            if *is_open {
                <RewardRouletteDialog
                    key={*open_count}
                    mission_set_id={props.mission_set_id}
                    on_close={close}
                />
            }
        </div>
    }
}
