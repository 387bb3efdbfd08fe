//! SVG transform attribute writing.

use sprig_animation_core::GroupTransform;

/// Transform attribute value for one rig group.
///
/// Operation order is translate, then rotate, then scale; scale arrives
/// already clamped to >= 0 by the compositor.
pub fn transform_attribute(t: &GroupTransform) -> String {
    format!(
        "translate({}, {}) rotate({}) scale({}, {})",
        t.position[0], t.position[1], t.rotation, t.scale[0], t.scale[1]
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neutral_transform() {
        let t = GroupTransform::default();
        assert_eq!(
            transform_attribute(&t),
            "translate(0, 0) rotate(0) scale(1, 1)"
        );
    }

    #[test]
    fn operation_order_is_translate_rotate_scale() {
        let t = GroupTransform {
            rotation: 45.0,
            position: [3.5, -2.0],
            scale: [0.5, 1.25],
        };
        assert_eq!(
            transform_attribute(&t),
            "translate(3.5, -2) rotate(45) scale(0.5, 1.25)"
        );
    }
}
