// src/app/renderer.rs
//! GameApp の描画関連ロジック。

use itertools::Itertools;
use log::trace;
use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::components::{Bounds, ContainerTree, Ingredient, Position, Sprite};
use crate::ecs::world::World;
use crate::logic::plate::{FillMethod, FillOrigin};
use crate::logic::PlateState;

const BACKGROUND_COLOR: &str = "#2c3e50";
const GAUGE_COLOR: &str = "#27ae60";
const HIGHLIGHT_COLOR: &str = "#f1c40f";
const LABEL_COLOR: &str = "#2c3e50";
const LABEL_FONT: &str = "14px sans-serif";

/// Canvas にキッチンを描く。手前のものほど後に描く (draw_key の昇順)。
pub fn render_kitchen(
    world: &World,
    canvas: &HtmlCanvasElement,
    context: &CanvasRenderingContext2d,
) -> Result<(), JsValue> {
    let canvas_width = canvas.width() as f64;
    let canvas_height = canvas.height() as f64;

    context.clear_rect(0.0, 0.0, canvas_width, canvas_height);
    context.set_global_alpha(1.0);
    context.set_fill_style_str(BACKGROUND_COLOR);
    context.fill_rect(0.0, 0.0, canvas_width, canvas_height);

    let drawables = world
        .get_all_entities_with_component::<Sprite>()
        .into_iter()
        .filter_map(|entity| {
            Some((
                entity,
                *world.get_component::<Position>(entity)?,
                *world.get_component::<Bounds>(entity)?,
                world.get_component::<Sprite>(entity)?,
            ))
        })
        .sorted_by_key(|(entity, ..)| (world.draw_key(*entity), *entity))
        .collect_vec();

    trace!("render_kitchen: {} drawables", drawables.len());

    for (entity, position, bounds, sprite) in drawables {
        let (x, y) = (position.x as f64, position.y as f64);
        let (w, h) = (bounds.width as f64, bounds.height as f64);

        context.set_global_alpha(sprite.opacity.clamp(0.0, 1.0) as f64);
        context.set_fill_style_str(&sprite.color);
        context.fill_rect(x, y, w, h);

        if let Some(plate) = world.get_component::<PlateState>(entity) {
            draw_plate_overlay(context, plate, x, y, w, h);
        }

        if let Some(ingredient) = world.get_component::<Ingredient>(entity) {
            context.set_fill_style_str(LABEL_COLOR);
            context.set_font(LABEL_FONT);
            context.set_text_align("center");
            context.set_text_baseline("middle");
            context.fill_text(ingredient.kind.label(), x + w / 2.0, y + h / 2.0)?;
        }
    }

    context.set_global_alpha(1.0);
    Ok(())
}

/// ゲージの塗りと、ホバー中のハイライト枠。
fn draw_plate_overlay(
    context: &CanvasRenderingContext2d,
    plate: &PlateState,
    x: f64,
    y: f64,
    w: f64,
    h: f64,
) {
    if let Some(gauge) = plate.gauge() {
        let amount = gauge.amount.clamp(0.0, 1.0) as f64;
        let (fx, fy, fw, fh) = match (gauge.method(), gauge.origin()) {
            (FillMethod::Vertical, FillOrigin::Top) => (x, y, w, h * amount),
            (FillMethod::Vertical, _) => (x, y + h * (1.0 - amount), w, h * amount),
            (FillMethod::Horizontal, FillOrigin::Right) => (x + w * (1.0 - amount), y, w * amount, h),
            (FillMethod::Horizontal, _) => (x, y, w * amount, h),
        };
        context.set_global_alpha(0.8);
        context.set_fill_style_str(GAUGE_COLOR);
        context.fill_rect(fx, fy, fw, fh);
    }

    if plate.is_highlighted() {
        context.set_global_alpha(1.0);
        context.set_stroke_style_str(HIGHLIGHT_COLOR);
        context.set_line_width(4.0);
        context.stroke_rect(x - 2.0, y - 2.0, w + 4.0, h + 4.0);
    }
}
