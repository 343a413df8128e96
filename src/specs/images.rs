// src/specs/images.rs
use crate::config::consts::{SHOT_IMAGE_HEIGHT, SHOT_IMAGE_WIDTH};
use crate::document::{Element, ElementKind, Page};

/// Every sheet diagram on the page with its element index, in document order.
/// Other images (logos, sponsor banners) never have the diagram's exact size.
pub fn shot_images(page: &Page) -> Vec<(usize, &Element)> {
    page.elements
        .iter()
        .enumerate()
        .filter(|(_, e)| {
            e.kind == ElementKind::Image
                && e.width == SHOT_IMAGE_WIDTH
                && e.height == SHOT_IMAGE_HEIGHT
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_only_diagram_sized_images_in_order() {
        let page = Page::new(1, vec![
            Element::image(10, 10, 200, 60, "logo.png"),
            Element::image(60, 150, 116, 232, "s1.png"),
            Element::text(60, 150, 116, 232, "not an image"),
            Element::image(200, 150, 116, 232, "s2.png"),
            Element::image(340, 150, 116, 231, "off_by_one.png"),
        ]);
        let found = shot_images(&page);
        let srcs: Vec<&str> = found.iter().filter_map(|(_, e)| e.src.as_deref()).collect();
        assert_eq!(srcs, ["s1.png", "s2.png"]);
        assert_eq!(found[1].0, 3);
    }
}
