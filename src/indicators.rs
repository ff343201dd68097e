use carousel_core::Carousel;
use wasm_bindgen::JsCast;
use web_sys as web;

pub const INDICATOR_CONTAINER_ID: &str = "carousel-indicators";
pub const SLIDE_INDEX_ATTR: &str = "data-slide-index";

/// Slide index carried by an indicator element, if any.
pub fn slide_index_of(el: &web::Element) -> Option<usize> {
    el.get_attribute(SLIDE_INDEX_ATTR)?.trim().parse().ok()
}

/// Restyle every indicator under `#carousel-indicators` for the active slide.
/// Indicators more than one step from the active slide are hidden.
pub fn sync(document: &web::Document, carousel: &Carousel, viewport_width: f32) {
    let Some(container) = document.get_element_by_id(INDICATOR_CONTAINER_ID) else {
        return;
    };
    let children = container.children();
    for i in 0..children.length() {
        let Some(el) = children.item(i) else {
            continue;
        };
        let Some(index) = slide_index_of(&el) else {
            continue;
        };
        if index >= carousel.slide_count() || !carousel.indicator_visible(index) {
            _ = el.set_attribute("style", "display: none;");
            _ = el.class_list().remove_1("active");
            continue;
        }
        _ = el.set_attribute("style", &carousel.indicator_position(index, viewport_width));
        _ = el
            .class_list()
            .toggle_with_force("active", index == carousel.active_slide());
    }
}

/// Walk up from a click target to the indicator element that holds it.
pub fn indicator_from_event(ev: &web::Event) -> Option<usize> {
    let target = ev.target()?.dyn_into::<web::Element>().ok()?;
    let el = target
        .closest(&format!("[{}]", SLIDE_INDEX_ATTR))
        .ok()
        .flatten()?;
    slide_index_of(&el)
}
