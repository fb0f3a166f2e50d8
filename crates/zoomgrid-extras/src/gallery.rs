#![forbid(unsafe_code)]

//! Image galleries: a grid over a list of links to images.

use zoomgrid_core::{ElementId, GridError, Host, StyleProp, ZoomGrid, ZoomGridConfig};

/// Replace every `A` child of `container` by a division showing the link
/// target as background image, then create the grid.
///
/// All linked images should have the same size; pair with
/// [`ZoomGrid::size_container_to_fit_around`] to fit the focused cell to it.
pub fn create_for_gallery(
    host: &mut dyn Host,
    container: ElementId,
    config: &ZoomGridConfig,
) -> Result<ZoomGrid, GridError> {
    let links: Vec<ElementId> = host
        .children(container)
        .into_iter()
        .filter(|info| info.has_tag("A"))
        .map(|info| info.id)
        .collect();

    for link in links {
        let image = host.create_element(Some(container), &config.tag_name, None);
        if let Some(href) = host.attribute(link, "href") {
            host.set_style(image, StyleProp::BackgroundImage(href));
        }
        host.replace_child(link, image);
    }
    zoomgrid_core::debug!("gallery links replaced");

    ZoomGrid::create(host, container, config)
}
