use std::cmp::Ordering;

/// One item the simulation wants drawn on the field.
///
/// Positions are in cell units; fractional coordinates sit between cells
/// (movement interpolation). The engine never mutates drawables, it only
/// rebuilds its sorted view when a new set arrives.
#[derive(Debug, Clone, PartialEq)]
pub struct Drawable {
    pub x: f64,
    pub y: f64,
    pub z: i32,
    pub texture_handle: String,
    pub tilable: bool,
    pub animated: bool,
}

impl Drawable {
    pub fn new(x: f64, y: f64, z: i32, texture_handle: impl Into<String>) -> Self {
        Self {
            x,
            y,
            z,
            texture_handle: texture_handle.into(),
            tilable: true,
            animated: false,
        }
    }

    pub fn with_tilable(mut self, tilable: bool) -> Self {
        self.tilable = tilable;
        self
    }

    pub fn with_animated(mut self, animated: bool) -> Self {
        self.animated = animated;
        self
    }

    /// Strict total draw order: z, then x, then y, then texture handle.
    pub fn draw_order(&self, other: &Drawable) -> Ordering {
        self.z
            .cmp(&other.z)
            .then_with(|| self.x.total_cmp(&other.x))
            .then_with(|| self.y.total_cmp(&other.y))
            .then_with(|| self.texture_handle.cmp(&other.texture_handle))
    }
}

pub(crate) fn sort_drawables(drawables: &mut [Drawable]) {
    drawables.sort_by(|a, b| a.draw_order(b));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(x: f64, y: f64, z: i32, handle: &str) -> Drawable {
        Drawable::new(x, y, z, handle)
    }

    #[test]
    fn z_dominates_position_and_texture() {
        let low = d(9.0, 9.0, 0, "zzz");
        let high = d(0.0, 0.0, 1, "aaa");
        assert_eq!(low.draw_order(&high), Ordering::Less);
        assert_eq!(high.draw_order(&low), Ordering::Greater);
    }

    #[test]
    fn ties_break_on_x_then_y_then_texture() {
        let a = d(1.0, 5.0, 0, "wall");
        let b = d(2.0, 0.0, 0, "wall");
        assert_eq!(a.draw_order(&b), Ordering::Less);

        let c = d(1.0, 1.0, 0, "wall");
        let e = d(1.0, 2.0, 0, "wall");
        assert_eq!(c.draw_order(&e), Ordering::Less);

        let f = d(1.0, 1.0, 0, "coin");
        let g = d(1.0, 1.0, 0, "wall");
        assert_eq!(f.draw_order(&g), Ordering::Less);
    }

    #[test]
    fn order_is_transitive_and_antisymmetric() {
        let items = [
            d(0.0, 0.0, 0, "a"),
            d(0.0, 0.0, 0, "b"),
            d(1.0, 0.0, 0, "a"),
            d(0.0, 1.0, 0, "a"),
            d(0.0, 0.0, 1, "a"),
        ];
        for a in &items {
            for b in &items {
                assert_eq!(a.draw_order(b), b.draw_order(a).reverse());
                for c in &items {
                    if a.draw_order(b) == Ordering::Less && b.draw_order(c) == Ordering::Less {
                        assert_eq!(a.draw_order(c), Ordering::Less);
                    }
                }
            }
        }
    }

    #[test]
    fn sorting_is_deterministic_across_input_orders() {
        let mut first = vec![
            d(2.0, 1.0, 0, "wall"),
            d(1.0, 1.0, 1, "coin"),
            d(1.0, 1.0, 0, "coin"),
            d(1.0, 1.0, 0, "wall"),
        ];
        let mut second = first.clone();
        second.reverse();
        sort_drawables(&mut first);
        sort_drawables(&mut second);
        assert_eq!(first, second);
    }
}
