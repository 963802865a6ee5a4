use crate::surface::Surface;

const GLYPH_WIDTH: i32 = 3;
const GLYPH_HEIGHT: i32 = 5;
const TEXT_SCALE: i32 = 2;
pub(crate) const GLYPH_ADVANCE: i32 = (GLYPH_WIDTH + 1) * TEXT_SCALE;

/// Pixels above the baseline covered by a glyph cell.
pub(crate) const FONT_ASCENT: i32 = GLYPH_HEIGHT * TEXT_SCALE;
/// Pixels reserved below the baseline (comma tails).
pub(crate) const FONT_DESCENT: i32 = TEXT_SCALE;

#[derive(Debug, Clone, Copy)]
struct Glyph {
    rows: [u8; GLYPH_HEIGHT as usize],
}

const SPACE_GLYPH: Glyph = Glyph {
    rows: [0, 0, 0, 0, 0],
};

const FALLBACK_GLYPH: Glyph = Glyph {
    rows: [0b111, 0b111, 0b111, 0b111, 0b111],
};

/// Draws `text` with its baseline at `baseline`, left edge at `x`.
pub(crate) fn draw_text(
    surface: &mut Surface<'_>,
    mut x: i32,
    baseline: i32,
    text: &str,
    color: [u8; 4],
) {
    let top = baseline - FONT_ASCENT;
    for ch in text.chars() {
        draw_glyph(surface, x, top, glyph_for(ch), color);
        x += GLYPH_ADVANCE;
    }
}

fn draw_glyph(surface: &mut Surface<'_>, x: i32, y: i32, glyph: Glyph, color: [u8; 4]) {
    for (row_index, row_bits) in glyph.rows.iter().enumerate() {
        let glyph_y = y + row_index as i32 * TEXT_SCALE;
        for col in 0..GLYPH_WIDTH {
            if (row_bits & (1 << (GLYPH_WIDTH - 1 - col))) == 0 {
                continue;
            }
            let glyph_x = x + col * TEXT_SCALE;
            for sy in 0..TEXT_SCALE {
                for sx in 0..TEXT_SCALE {
                    surface.set_pixel(glyph_x + sx, glyph_y + sy, color);
                }
            }
        }
    }
}

fn glyph_for(ch: char) -> Glyph {
    match ch {
        ' ' => SPACE_GLYPH,
        '(' => Glyph {
            rows: [0b001, 0b010, 0b010, 0b010, 0b001],
        },
        ')' => Glyph {
            rows: [0b100, 0b010, 0b010, 0b010, 0b100],
        },
        ',' => Glyph {
            rows: [0b000, 0b000, 0b000, 0b010, 0b100],
        },
        '-' => Glyph {
            rows: [0b000, 0b000, 0b111, 0b000, 0b000],
        },
        '=' => Glyph {
            rows: [0b000, 0b111, 0b000, 0b111, 0b000],
        },
        '0' => Glyph {
            rows: [0b111, 0b101, 0b101, 0b101, 0b111],
        },
        '1' => Glyph {
            rows: [0b010, 0b110, 0b010, 0b010, 0b111],
        },
        '2' => Glyph {
            rows: [0b111, 0b001, 0b111, 0b100, 0b111],
        },
        '3' => Glyph {
            rows: [0b111, 0b001, 0b111, 0b001, 0b111],
        },
        '4' => Glyph {
            rows: [0b101, 0b101, 0b111, 0b001, 0b001],
        },
        '5' => Glyph {
            rows: [0b111, 0b100, 0b111, 0b001, 0b111],
        },
        '6' => Glyph {
            rows: [0b111, 0b100, 0b111, 0b101, 0b111],
        },
        '7' => Glyph {
            rows: [0b111, 0b001, 0b010, 0b010, 0b010],
        },
        '8' => Glyph {
            rows: [0b111, 0b101, 0b111, 0b101, 0b111],
        },
        '9' => Glyph {
            rows: [0b111, 0b101, 0b111, 0b001, 0b111],
        },
        'C' => Glyph {
            rows: [0b011, 0b100, 0b100, 0b100, 0b011],
        },
        'e' => Glyph {
            rows: [0b011, 0b101, 0b111, 0b100, 0b011],
        },
        'l' => Glyph {
            rows: [0b010, 0b010, 0b010, 0b010, 0b011],
        },
        'x' => Glyph {
            rows: [0b000, 0b101, 0b010, 0b101, 0b000],
        },
        'y' => Glyph {
            rows: [0b101, 0b101, 0b111, 0b001, 0b110],
        },
        _ => FALLBACK_GLYPH,
    }
}
