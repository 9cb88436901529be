use yew::prelude::*;
use web_sys::{window, HtmlCanvasElement, CanvasRenderingContext2d};
use wasm_bindgen::JsCast;
use std::f64::consts::PI;
use shared::reward_roulette::{sector_center_angle, sector_start_angle, sector_width};

const SEGMENT_COLORS: [&str; 6] = [
    "#f97316", // Orange
    "#06b6d4", // Cyan
    "#8b5cf6", // Violet
    "#ec4899", // Pink
    "#22c55e", // Green
    "#eab308", // Amber
];

#[derive(Properties, PartialEq)]
pub struct WheelCanvasProps {
    /// Cumulative wheel rotation in degrees.
    pub rotation: f64,
    pub is_spinning: bool,
    pub option_names: Vec<String>,
    /// Sector to highlight once the wheel has landed.
    #[prop_or_default]
    pub highlight: Option<usize>,
}

fn to_radians(degrees: f64) -> f64 {
    degrees * PI / 180.0
}

fn segment_color(index: usize, count: usize) -> &'static str {
    // avoid the first and last sector sharing a color
    let palette = if count % SEGMENT_COLORS.len() == 1 && count > 1 {
        SEGMENT_COLORS.len() - 1
    } else {
        SEGMENT_COLORS.len()
    };
    SEGMENT_COLORS[index % palette]
}

fn is_dark_mode() -> bool {
    window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
        .map(|el| el.class_list().contains("dark"))
        .unwrap_or(false)
}

fn draw_wheel(
    context: &CanvasRenderingContext2d,
    width: f64,
    height: f64,
    rotation: f64,
    is_spinning: bool,
    option_names: &[String],
    highlight: Option<usize>,
) {
    let center_x = width / 2.0;
    let center_y = height / 2.0;
    let radius = if width < height { width / 2.0 - 20.0 } else { height / 2.0 - 20.0 };
    let count = option_names.len().max(1);
    let is_dark_mode = is_dark_mode();

    context.clear_rect(0.0, 0.0, width, height);

    // Outer glow
    let glow_intensity = if is_spinning { 0.25 } else { 0.15 };
    context.begin_path();
    if is_dark_mode {
        context.set_fill_style_str(&format!("rgba(130, 100, 255, {})", glow_intensity));
    } else {
        context.set_fill_style_str(&format!("rgba(100, 130, 255, {})", glow_intensity));
    }
    let _ = context.arc(center_x, center_y, radius + 15.0, 0.0, 2.0 * PI);
    context.fill();

    context.begin_path();
    context.set_fill_style_str(if is_dark_mode { "#1a1c2e" } else { "#f0f2ff" });
    let _ = context.arc(center_x, center_y, radius, 0.0, 2.0 * PI);
    context.fill();

    // Sectors are laid out in the rotated frame, so index i starts at i * step.
    context.save();
    let _ = context.translate(center_x, center_y);
    let _ = context.rotate(to_radians(rotation));
    let _ = context.translate(-center_x, -center_y);

    let step = to_radians(sector_width(count));
    for index in 0..count {
        let start = to_radians(sector_start_angle(index, count, 0.0));

        context.begin_path();
        context.set_fill_style_str(segment_color(index, count));
        context.move_to(center_x, center_y);
        let _ = context.arc(center_x, center_y, radius, start, start + step);
        context.close_path();
        context.fill();

        if !is_spinning && highlight == Some(index) {
            context.begin_path();
            context.set_fill_style_str("rgba(255, 255, 255, 0.35)");
            context.move_to(center_x, center_y);
            let _ = context.arc(center_x, center_y, radius, start, start + step);
            context.close_path();
            context.fill();
        }
    }

    // Dividers
    if count > 1 {
        context.set_stroke_style_str(if is_dark_mode {
            "rgba(255, 255, 255, 0.7)"
        } else {
            "rgba(255, 255, 255, 0.9)"
        });
        context.set_line_width(2.5);
        for index in 0..count {
            let angle = to_radians(sector_start_angle(index, count, 0.0));
            context.begin_path();
            context.move_to(center_x, center_y);
            context.line_to(center_x + radius * angle.cos(), center_y + radius * angle.sin());
            context.stroke();
        }
    }

    // Labels
    context.set_text_align("center");
    context.set_text_baseline("middle");
    context.set_fill_style_str("#ffffff");
    context.set_font("bold 18px 'Segoe UI', Roboto, system-ui, sans-serif");
    context.set_shadow_color(if is_dark_mode { "rgba(0, 0, 0, 0.7)" } else { "rgba(0, 0, 0, 0.5)" });
    context.set_shadow_blur(3.0);
    for (index, name) in option_names.iter().enumerate() {
        context.save();
        let _ = context.translate(center_x, center_y);
        let _ = context.rotate(to_radians(sector_center_angle(index, count, 0.0)));
        let _ = context.translate(radius * 0.6, 0.0);
        let _ = context.fill_text(name, 0.0, 0.0);
        context.restore();
    }
    context.set_shadow_color("rgba(0, 0, 0, 0)");
    context.set_shadow_blur(0.0);

    context.restore();

    // Hub
    let inner_radius = radius * 0.2;
    context.begin_path();
    context.set_fill_style_str(if is_dark_mode { "#2d3142" } else { "#8b5cf6" });
    let _ = context.arc(center_x, center_y, inner_radius, 0.0, 2.0 * PI);
    context.fill();

    // Outer ring
    context.begin_path();
    context.set_stroke_style_str(if is_dark_mode {
        "rgba(180, 130, 255, 0.5)"
    } else {
        "rgba(130, 100, 255, 0.5)"
    });
    context.set_line_width(if is_spinning { 5.0 } else { 4.0 });
    let _ = context.arc(center_x, center_y, radius - 2.0, 0.0, 2.0 * PI);
    context.stroke();

    // Pointer at 12 o'clock, tip pointing into the wheel
    let pointer_width = 20.0;
    let pointer_height = 30.0;
    context.begin_path();
    context.move_to(center_x, center_y - radius + 5.0);
    context.line_to(center_x - pointer_width, center_y - radius - pointer_height);
    context.line_to(center_x + pointer_width, center_y - radius - pointer_height);
    context.close_path();
    context.set_fill_style_str(if is_spinning { "#ffd700" } else { "#f59e0b" });
    context.fill();
    context.set_stroke_style_str("#e69500");
    context.set_line_width(1.5);
    context.stroke();
}

#[function_component(WheelCanvas)]
pub fn wheel_canvas(props: &WheelCanvasProps) -> Html {
    let canvas_ref = use_node_ref();

    {
        let canvas_ref = canvas_ref.clone();

        use_effect_with(
            (props.rotation, props.is_spinning, props.option_names.clone(), props.highlight),
            move |(rotation, is_spinning, option_names, highlight)| {
                let context = canvas_ref
                    .cast::<HtmlCanvasElement>()
                    .and_then(|canvas| {
                        let context = canvas
                            .get_context("2d")
                            .ok()
                            .flatten()?
                            .dyn_into::<CanvasRenderingContext2d>()
                            .ok()?;
                        Some((canvas, context))
                    });

                if let Some((canvas, context)) = context {
                    draw_wheel(
                        &context,
                        canvas.width() as f64,
                        canvas.height() as f64,
                        *rotation,
                        *is_spinning,
                        option_names,
                        *highlight,
                    );
                }
                || ()
            },
        );
    }

    html! {
        <div class="relative">
            <canvas
                ref={canvas_ref}
                width="450"
                height="450"
                class="w-full max-w-[450px] h-auto rounded-full shadow-lg transition-all duration-300"
                style={if props.is_spinning {
                    "filter: drop-shadow(0px 5px 20px rgba(130, 100, 255, 0.4));"
                } else {
                    "filter: drop-shadow(0px 5px 15px rgba(0, 0, 0, 0.2));"
                }}
            />
        </div>
    }
}
