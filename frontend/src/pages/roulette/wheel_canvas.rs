use goalwheel_shared::constants::{SEGMENT_ANGLE, SEGMENT_COUNT};
use std::f64::consts::PI;
use wasm_bindgen::JsCast;
use web_sys::{window, CanvasRenderingContext2d, HtmlCanvasElement};
use yew::prelude::*;

const SEGMENT_COLORS: [&str; 2] = ["#f97316", "#8b5cf6"];
const CANVAS_SIZE: u32 = 420;

#[derive(Properties, PartialEq)]
pub struct WheelCanvasProps {
    /// Cumulative rotation in degrees, applied as a CSS transform.
    pub rotation: i64,
    pub transition: String,
    pub is_spinning: bool,
}

/// Start and end of segment `number` in canvas degrees (0° at three o'clock,
/// clockwise), laid out so the segment read under the top pointer matches
/// `segment_for_rotation`.
pub fn segment_arc(number: i64) -> (f64, f64) {
    let start = (number - 7) * SEGMENT_ANGLE;
    (start as f64, (start + SEGMENT_ANGLE) as f64)
}

fn to_radians(degrees: f64) -> f64 {
    degrees * PI / 180.0
}

fn is_dark_mode() -> bool {
    window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
        .map(|el| el.class_list().contains("dark"))
        .unwrap_or(false)
}

fn draw_wheel(canvas: &HtmlCanvasElement) -> Option<()> {
    let context = canvas
        .get_context("2d")
        .ok()
        .flatten()?
        .dyn_into::<CanvasRenderingContext2d>()
        .ok()?;

    let size = canvas.width() as f64;
    let center = size / 2.0;
    let radius = center - 10.0;
    let dark = is_dark_mode();

    context.clear_rect(0.0, 0.0, size, size);

    for number in 1..=SEGMENT_COUNT {
        let (start, end) = segment_arc(number);
        context.begin_path();
        context.set_fill_style_str(SEGMENT_COLORS[(number % 2) as usize]);
        context.move_to(center, center);
        let _ = context.arc(center, center, radius, to_radians(start), to_radians(end));
        context.close_path();
        context.fill();

        context.set_stroke_style_str(if dark { "rgba(255, 255, 255, 0.5)" } else { "#ffffff" });
        context.set_line_width(2.0);
        context.stroke();

        // Number label in the middle of the wedge, reading outwards
        context.save();
        let _ = context.translate(center, center);
        let _ = context.rotate(to_radians((start + end) / 2.0));
        let _ = context.translate(radius * 0.72, 0.0);
        let _ = context.rotate(PI / 2.0);
        context.set_fill_style_str("#ffffff");
        context.set_font("bold 22px 'Segoe UI', Roboto, system-ui, sans-serif");
        context.set_text_align("center");
        context.set_text_baseline("middle");
        let _ = context.fill_text(&number.to_string(), 0.0, 0.0);
        context.restore();
    }

    context.begin_path();
    context.set_fill_style_str(if dark { "#2d3142" } else { "#f0f2ff" });
    let _ = context.arc(center, center, radius * 0.2, 0.0, 2.0 * PI);
    context.fill();

    Some(())
}

#[function_component(WheelCanvas)]
pub fn wheel_canvas(props: &WheelCanvasProps) -> Html {
    let canvas_ref = use_node_ref();

    {
        let canvas_ref = canvas_ref.clone();
        use_effect_with((), move |_| {
            if let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() {
                if draw_wheel(&canvas).is_none() {
                    log::error!("Could not get a 2d context for the roulette wheel");
                }
            }
            || ()
        });
    }

    let style = format!(
        "transform: rotate({}deg); transition: {};{}",
        props.rotation,
        props.transition,
        if props.is_spinning {
            " filter: drop-shadow(0px 5px 20px rgba(130, 100, 255, 0.4));"
        } else {
            ""
        }
    );

    html! {
        <div class="relative mx-auto w-full max-w-[420px]">
            // Fixed pointer at twelve o'clock
            <div class="absolute left-1/2 -top-2 z-10 -translate-x-1/2 w-0 h-0 border-l-[14px] border-r-[14px] border-t-[26px] border-l-transparent border-r-transparent border-t-amber-500"></div>
            <canvas
                ref={canvas_ref}
                width={CANVAS_SIZE.to_string()}
                height={CANVAS_SIZE.to_string()}
                class="w-full h-auto rounded-full shadow-lg"
                style={style}
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use goalwheel_shared::constants::INITIAL_ROTATION;
    use goalwheel_shared::shared_roulette::{is_valid_angle, segment_for_rotation};

    #[test]
    fn drawn_segment_under_pointer_matches_mapping() {
        for angle in (0..360).filter(|&a| is_valid_angle(a)) {
            let rotation = INITIAL_ROTATION + i64::from(angle);
            let segment = i64::from(segment_for_rotation(rotation).number());

            // canvas angle sitting under the twelve o'clock pointer
            let under_pointer = (270 - rotation).rem_euclid(360) as f64;
            let (start, _) = segment_arc(segment);
            let offset = (under_pointer - start).rem_euclid(360.0);
            assert!(offset < SEGMENT_ANGLE as f64, "angle {} landed outside segment {}", angle, segment);
        }
    }
}
