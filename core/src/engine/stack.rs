use super::{LayoutError, LayoutResult};
use crate::model::{BoxCatalog, Layer, Stack};

/// Z level of every stack position, base first.
///
/// Each layer's height is subtracted *before* its boxes are placed, so Z
/// decreases with stack index. This is fixed to the reference machine, whose Z
/// axis points down from its home at the top.
pub fn resolve_stack_heights(
    stack: &Stack,
    layers: &[Layer],
    catalog: &BoxCatalog,
    base_z: f64,
) -> LayoutResult<Vec<f64>> {
    let mut current_z = base_z;
    let mut levels = Vec::with_capacity(stack.len());

    for (position, index) in stack.iter().enumerate() {
        let layer = layers.get(index).ok_or(LayoutError::InvalidStackReference {
            position,
            index,
            layer_count: layers.len(),
        })?;

        current_z -= layer.height(catalog)?;
        levels.push(current_z);
    }

    Ok(levels)
}
