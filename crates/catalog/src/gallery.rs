//! Product image ordering for the gallery and listing thumbnails.

use crate::model::ProductImage;

/// Images in display order.
///
/// Positioned images come first, ascending by position; images without a
/// position follow in upload order. Ties keep upload order.
pub fn ordered_images(images: &[ProductImage]) -> Vec<&ProductImage> {
    let mut ordered: Vec<&ProductImage> = images.iter().collect();
    ordered.sort_by_key(|img| (img.position.is_none(), img.position));
    ordered
}

/// The image shown on cards and as the gallery's first frame.
pub fn primary_image(images: &[ProductImage]) -> Option<&ProductImage> {
    ordered_images(images).into_iter().next()
}
