//! A [`FontEngine`] producing TrueType-flavoured OpenType fonts
//!
//! Glyph outlines are kept as straight-sided contours in font units until
//! [`compile`](FontEngine::compile), where every table is built with
//! `write-fonts`.

use std::collections::{btree_map::Entry, BTreeMap};

use kurbo::{Rect, Vec2};
use write_fonts::{
    read::{tables::compute_checksum, FontRef},
    tables::{
        cmap::Cmap,
        gasp::{Gasp, GaspRange, GaspRangeBehavior},
        glyf::{Bbox, GlyfLocaBuilder, SimpleGlyph},
        head::{Flags, Head},
        hhea::Hhea,
        hmtx::{Hmtx, LongMetric},
        maxp::Maxp,
        name::{Name, NameRecord},
        os2::Os2,
        post::Post,
    },
    types::{FWord, Fixed, GlyphId, NameId, Tag, UfWord},
    FontBuilder,
};

use crate::{
    engine::{FontEngine, GlyphSlot},
    error::Error,
    info::FontInfo,
    names::glyph_name,
    outline::{self, Contour},
    shape::GlyphShape,
};

const HEAD: Tag = Tag::new(b"head");
// https://learn.microsoft.com/en-us/typography/opentype/spec/head
const HEAD_CHECKSUM_ADJUSTMENT_OFFSET: usize = 8;
const CHECKSUM_MAGIC: u32 = 0xB1B0_AFBA;

// https://learn.microsoft.com/en-us/typography/opentype/spec/name#windows-platform-specific-encodings-and-language-ids
const WINDOWS_PLATFORM: u16 = 3;
const WINDOWS_UNICODE_BMP: u16 = 1;
const WINDOWS_ENGLISH_US: u16 = 0x409;

// https://learn.microsoft.com/en-us/typography/opentype/spec/os2#ur
const BASIC_LATIN: u32 = 1 << 0;
const LATIN_1_SUPPLEMENT: u32 = 1 << 1;
// https://learn.microsoft.com/en-us/typography/opentype/spec/os2#cpr
const CODE_PAGE_LATIN_1: u32 = 1 << 0;

/// Builds a TrueType font from glyphs registered by codepoint.
#[derive(Clone, Debug)]
pub struct TrueTypeEngine {
    info: FontInfo,
    glyphs: BTreeMap<u32, TrueTypeGlyph>,
    hinted: bool,
}

/// A glyph held by a [`TrueTypeEngine`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TrueTypeGlyph {
    name: Option<String>,
    advance: u16,
    contours: Vec<Contour>,
    /// Top of the glyph box, for mapping imported shapes into font space.
    ascent: f64,
}

impl TrueTypeGlyph {
    pub fn advance(&self) -> u16 {
        self.advance
    }

    pub fn contours(&self) -> &[Contour] {
        &self.contours
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The bounding box of the outline, if there is one.
    pub fn bounds(&self) -> Option<Rect> {
        outline::bounds(&self.contours)
    }

    fn translate(&mut self, delta: Vec2) {
        self.contours
            .iter_mut()
            .flatten()
            .for_each(|pt| *pt += delta);
    }
}

impl GlyphSlot for TrueTypeGlyph {
    fn import_outline(&mut self, shape: &GlyphShape) {
        // SVG rows grow downwards from the top of the em box, and shapes
        // arrive with their columns reversed; undo both
        let top = self.ascent;
        let right = shape.width as f64;
        self.contours.extend(shape.squares.iter().map(|square| {
            let (x, y, size) = (square.x as f64, square.y as f64, square.size as f64);
            let x = right - x - size;
            outline::rect_contour(Rect::new(x, top - y - size, x + size, top - y))
        }));
    }

    fn set_advance(&mut self, advance: u16) {
        self.advance = advance;
    }

    fn set_left_side_bearing(&mut self, lsb: i32) {
        let Some(bounds) = self.bounds() else {
            return;
        };
        let delta = lsb as f64 - bounds.x0;
        self.translate(Vec2::new(delta, 0.0));
        self.advance = clamp_advance(self.advance as f64 + delta);
    }

    fn set_right_side_bearing(&mut self, rsb: i32) {
        if let Some(bounds) = self.bounds() {
            self.advance = clamp_advance(bounds.x1 + rsb as f64);
        }
    }

    fn simplify(&mut self) {
        self.contours = self
            .contours
            .iter()
            .map(|contour| outline::simplify_contour(contour))
            .filter(|contour| !contour.is_empty())
            .collect();
    }

    fn remove_overlap(&mut self) {
        self.contours = outline::remove_overlaps(&self.contours);
    }

    fn round(&mut self) {
        self.contours = self
            .contours
            .iter()
            .map(|contour| outline::round_contour(contour))
            .collect();
    }
}

fn clamp_advance(advance: f64) -> u16 {
    advance.round().clamp(0.0, u16::MAX as f64) as u16
}

/// A glyph ready to be written, in glyph id order.
struct CompiledGlyph {
    codepoint: Option<u32>,
    name: String,
    advance: u16,
    glyph: SimpleGlyph,
}

impl CompiledGlyph {
    fn bbox(&self) -> Option<Bbox> {
        (!self.glyph.contours.is_empty()).then_some(self.glyph.bbox)
    }

    fn lsb(&self) -> i16 {
        self.bbox().map(|bbox| bbox.x_min).unwrap_or_default()
    }

    fn num_points(&self) -> usize {
        self.glyph.contours.iter().map(|c| c.len()).sum()
    }
}

impl TrueTypeEngine {
    pub fn new(info: FontInfo) -> Self {
        TrueTypeEngine {
            info,
            glyphs: BTreeMap::new(),
            hinted: false,
        }
    }

    pub fn info(&self) -> &FontInfo {
        &self.info
    }

    pub fn glyph(&self, codepoint: u32) -> Option<&TrueTypeGlyph> {
        self.glyphs.get(&codepoint)
    }

    /// Registered codepoints, in increasing order.
    pub fn codepoints(&self) -> impl Iterator<Item = u32> + '_ {
        self.glyphs.keys().copied()
    }

    pub fn is_hinted(&self) -> bool {
        self.hinted
    }

    /// `.notdef` followed by every registered glyph, in codepoint order.
    fn compiled_glyphs(&self) -> Result<Vec<CompiledGlyph>, Error> {
        let notdef_advance = self
            .glyphs
            .values()
            .map(|g| g.advance)
            .max()
            .unwrap_or(self.info.units_per_em / 2);
        let mut compiled = vec![CompiledGlyph {
            codepoint: None,
            name: ".notdef".into(),
            advance: notdef_advance,
            glyph: SimpleGlyph::default(),
        }];
        for (codepoint, glyph) in &self.glyphs {
            let simple = if glyph.contours.is_empty() {
                SimpleGlyph::default()
            } else {
                let path = outline::to_bezpath(&glyph.contours);
                SimpleGlyph::from_bezpath(&path).map_err(|e| Error::MalformedOutline {
                    codepoint: *codepoint,
                    reason: format!("{e:?}"),
                })?
            };
            compiled.push(CompiledGlyph {
                codepoint: Some(*codepoint),
                name: glyph
                    .name
                    .clone()
                    .unwrap_or_else(|| glyph_name(*codepoint)),
                advance: glyph.advance,
                glyph: simple,
            });
        }
        Ok(compiled)
    }

    fn head(&self, font_bbox: Bbox, loca_format: i16) -> Head {
        let flags = Flags::BASELINE_AT_Y_0 | Flags::LSB_AT_X_0;
        Head {
            font_revision: Fixed::from_f64(1.0),
            flags: if self.hinted {
                flags | Flags::FORCE_INTEGER_PPEM
            } else {
                flags
            },
            units_per_em: self.info.units_per_em,
            x_min: font_bbox.x_min,
            y_min: font_bbox.y_min,
            x_max: font_bbox.x_max,
            y_max: font_bbox.y_max,
            lowest_rec_ppem: 8,
            index_to_loc_format: loca_format,
            ..Default::default()
        }
    }

    fn hhea(&self, glyphs: &[CompiledGlyph]) -> Hhea {
        let inked = || glyphs.iter().filter_map(|g| g.bbox().map(|bbox| (g, bbox)));
        Hhea {
            ascender: FWord::new(self.info.ascent),
            descender: FWord::new(self.info.descent),
            line_gap: FWord::new(0),
            advance_width_max: UfWord::new(glyphs.iter().map(|g| g.advance).max().unwrap_or(0)),
            min_left_side_bearing: FWord::new(
                inked().map(|(_, bbox)| bbox.x_min).min().unwrap_or(0),
            ),
            min_right_side_bearing: FWord::new(
                inked()
                    .map(|(g, bbox)| (g.advance as i32 - bbox.x_max as i32) as i16)
                    .min()
                    .unwrap_or(0),
            ),
            x_max_extent: FWord::new(inked().map(|(_, bbox)| bbox.x_max).max().unwrap_or(0)),
            caret_slope_rise: 1,
            caret_slope_run: 0,
            caret_offset: 0,
            number_of_h_metrics: glyphs.len() as u16,
        }
    }

    fn maxp(&self, glyphs: &[CompiledGlyph]) -> Maxp {
        Maxp {
            num_glyphs: glyphs.len() as u16,
            max_points: Some(glyphs.iter().map(|g| g.num_points()).max().unwrap_or(0) as u16),
            max_contours: Some(
                glyphs
                    .iter()
                    .map(|g| g.glyph.contours.len())
                    .max()
                    .unwrap_or(0) as u16,
            ),
            max_composite_points: Some(0),
            max_composite_contours: Some(0),
            max_zones: Some(1),
            max_twilight_points: Some(0),
            max_storage: Some(0),
            max_function_defs: Some(0),
            max_instruction_defs: Some(0),
            max_stack_elements: Some(0),
            max_size_of_instructions: Some(0),
            max_component_elements: Some(0),
            max_component_depth: Some(0),
        }
    }

    fn os2(&self, glyphs: &[CompiledGlyph], font_bbox: Bbox) -> Os2 {
        let advances = glyphs
            .iter()
            .map(|g| g.advance as u32)
            .filter(|advance| *advance > 0)
            .collect::<Vec<_>>();
        let avg_width = advances.iter().sum::<u32>() / (advances.len().max(1) as u32);
        let codepoints = glyphs.iter().filter_map(|g| g.codepoint);
        let first = codepoints.clone().min().unwrap_or(0);
        let last = codepoints.max().unwrap_or(0);
        let cap_height = glyphs
            .iter()
            .find(|g| g.codepoint == Some('H' as u32))
            .and_then(CompiledGlyph::bbox)
            .map(|bbox| bbox.y_max);
        let x_height = glyphs
            .iter()
            .find(|g| g.codepoint == Some('x' as u32))
            .and_then(CompiledGlyph::bbox)
            .map(|bbox| bbox.y_max);
        Os2 {
            x_avg_char_width: avg_width.min(i16::MAX as u32) as i16,
            us_weight_class: 400,
            us_width_class: 5,
            ul_unicode_range_1: BASIC_LATIN | LATIN_1_SUPPLEMENT,
            us_first_char_index: first.min(0xFFFF) as u16,
            us_last_char_index: last.min(0xFFFF) as u16,
            s_typo_ascender: self.info.ascent,
            s_typo_descender: self.info.descent,
            s_typo_line_gap: 0,
            us_win_ascent: self.info.ascent.max(font_bbox.y_max).max(0) as u16,
            us_win_descent: (-self.info.descent).max(-font_bbox.y_min).max(0) as u16,
            ul_code_page_range_1: Some(CODE_PAGE_LATIN_1),
            ul_code_page_range_2: Some(0),
            sx_height: Some(x_height.unwrap_or(0)),
            s_cap_height: Some(cap_height.unwrap_or(0)),
            us_default_char: Some(0),
            us_break_char: Some(crate::SPACE as u16),
            us_max_context: Some(0),
            ..Default::default()
        }
    }

    fn name(&self) -> Name {
        let info = &self.info;
        let mut name = Name::default();
        name.name_record = [
            (NameId::COPYRIGHT_NOTICE, info.copyright.clone()),
            (NameId::FAMILY_NAME, info.family_name.clone()),
            (NameId::SUBFAMILY_NAME, info.subfamily_name.clone()),
            (NameId::UNIQUE_ID, info.unique_id()),
            (NameId::FULL_NAME, info.full_name.clone()),
            (NameId::VERSION_STRING, info.version.clone()),
            (NameId::POSTSCRIPT_NAME, info.postscript_name.clone()),
        ]
        .into_iter()
        .filter(|(_, string)| !string.is_empty())
        .map(|(name_id, string)| {
            NameRecord::new(
                WINDOWS_PLATFORM,
                WINDOWS_UNICODE_BMP,
                WINDOWS_ENGLISH_US,
                name_id,
                string.into(),
            )
        })
        .collect();
        name.name_record.sort();
        name
    }

    fn post(&self, glyphs: &[CompiledGlyph]) -> Post {
        // one pixel thick, one pixel below the baseline
        let thickness = (self.info.units_per_em / crate::FONT_HEIGHT).max(1) as i16;
        let mut post = Post::new_v2(glyphs.iter().map(|g| g.name.as_str()));
        post.underline_position = FWord::new(self.info.descent - thickness);
        post.underline_thickness = FWord::new(thickness);
        post.is_fixed_pitch = 1;
        post
    }

    fn gasp(&self) -> Gasp {
        Gasp {
            version: 1,
            num_ranges: 1,
            gasp_ranges: vec![GaspRange {
                range_max_ppem: 0xFFFF,
                range_gasp_behavior: GaspRangeBehavior::GASP_GRIDFIT
                    | GaspRangeBehavior::GASP_DOGRAY
                    | GaspRangeBehavior::GASP_SYMMETRIC_GRIDFIT
                    | GaspRangeBehavior::GASP_SYMMETRIC_SMOOTHING,
            }],
        }
    }
}

impl FontEngine for TrueTypeEngine {
    type Glyph = TrueTypeGlyph;

    fn create_glyph(&mut self, codepoint: u32, name: Option<&str>) -> &mut TrueTypeGlyph {
        let glyph = TrueTypeGlyph {
            name: name.map(str::to_owned),
            ascent: self.info.ascent as f64,
            ..Default::default()
        };
        match self.glyphs.entry(codepoint) {
            Entry::Occupied(mut entry) => {
                log::debug!("replacing existing glyph for U+{codepoint:04X}");
                entry.insert(glyph);
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(glyph),
        }
    }

    fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    /// No instructions are generated: the outlines already sit on the pixel
    /// grid, so this only adds a `gasp` table asking rasterizers to grid-fit
    /// at every size and sets `FORCE_INTEGER_PPEM` in `head`.
    fn auto_hint(&mut self) {
        self.hinted = true;
    }

    fn compile(&self) -> Result<Vec<u8>, Error> {
        let glyphs = self.compiled_glyphs()?;

        let mut glyf_loca = GlyfLocaBuilder::new();
        for glyph in &glyphs {
            glyf_loca
                .add_glyph(&glyph.glyph)
                .map_err(|source| Error::Glyph {
                    codepoint: glyph.codepoint.unwrap_or_default(),
                    source,
                })?;
        }
        let (glyf, loca, loca_format) = glyf_loca.build();

        let font_bbox = glyphs
            .iter()
            .filter_map(CompiledGlyph::bbox)
            .reduce(Bbox::union)
            .unwrap_or_default();

        let hmtx = Hmtx {
            h_metrics: glyphs
                .iter()
                .map(|g| LongMetric {
                    advance: g.advance,
                    side_bearing: g.lsb(),
                })
                .collect(),
            left_side_bearings: Vec::new(),
        };
        let cmap = Cmap::from_mappings(glyphs.iter().enumerate().filter_map(|(gid, g)| {
            let ch = char::from_u32(g.codepoint?)?;
            Some((ch, GlyphId::new(gid as u32)))
        }))?;

        let mut builder = FontBuilder::new();
        builder
            .add_table(&self.head(font_bbox, loca_format as i16))?
            .add_table(&self.hhea(&glyphs))?
            .add_table(&self.maxp(&glyphs))?
            .add_table(&self.os2(&glyphs, font_bbox))?
            .add_table(&hmtx)?
            .add_table(&cmap)?
            .add_table(&glyf)?
            .add_table(&loca)?
            .add_table(&self.name())?
            .add_table(&self.post(&glyphs))?;
        if self.hinted {
            builder.add_table(&self.gasp())?;
        }
        let mut font = builder.build();
        set_checksum_adjustment(&mut font);
        log::debug!(
            "compiled {} glyphs into {} bytes",
            glyphs.len(),
            font.len()
        );
        Ok(font)
    }
}

/// Fill in `head.checksumAdjustment` once every other byte is final.
fn set_checksum_adjustment(font: &mut [u8]) {
    let head_offset = FontRef::new(font).ok().and_then(|font| {
        font.table_directory
            .table_records()
            .iter()
            .find(|record| record.tag() == HEAD)
            .map(|record| record.offset() as usize)
    });
    let Some(offset) = head_offset else {
        log::warn!("no head table, checksum adjustment not set");
        return;
    };
    let start = offset + HEAD_CHECKSUM_ADJUSTMENT_OFFSET;
    let field = start..start + 4;
    font[field.clone()].copy_from_slice(&[0; 4]);
    let adjustment = CHECKSUM_MAGIC.wrapping_sub(compute_checksum(font));
    font[field].copy_from_slice(&adjustment.to_be_bytes());
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use write_fonts::read::{tables::glyf::Glyph, TableProvider};

    use super::*;
    use crate::{bitmap::GlyphBitmap, FONT_WIDTH};

    fn engine() -> TrueTypeEngine {
        TrueTypeEngine::new(FontInfo::for_scale(64))
    }

    fn import(engine: &mut TrueTypeEngine, codepoint: u32, rows: [u8; 16]) -> &mut TrueTypeGlyph {
        let bitmap = GlyphBitmap::new(rows);
        let shape = GlyphShape::from_bitmap(&bitmap, 64);
        let bearings = bitmap.side_bearings(64);
        let glyph = engine.create_glyph(codepoint, None);
        glyph.import_outline(&shape);
        glyph.set_advance(FONT_WIDTH * 64);
        glyph.set_left_side_bearing(bearings.left as i32);
        glyph.set_right_side_bearing(bearings.right as i32);
        glyph.simplify();
        glyph.remove_overlap();
        glyph.round();
        glyph
    }

    #[test]
    fn import_flips_y() {
        let mut engine = engine();
        let glyph = engine.create_glyph(0x41, None);
        let mut rows = [0u8; 16];
        rows[0] = 0x01;
        glyph.import_outline(&GlyphShape::from_bitmap(&GlyphBitmap::new(rows), 64));
        // top row, rightmost column
        assert_eq!(glyph.bounds(), Some(Rect::new(448.0, 960.0, 512.0, 1024.0)));

        let glyph = engine.create_glyph(0x41, None);
        rows[0] = 0x80;
        glyph.import_outline(&GlyphShape::from_bitmap(&GlyphBitmap::new(rows), 64));
        assert_eq!(glyph.bounds(), Some(Rect::new(0.0, 960.0, 64.0, 1024.0)));
    }

    #[test]
    fn bearings_move_the_outline() {
        let mut engine = engine();
        let glyph = import(
            &mut engine,
            0x27,
            bitfont_test_data::glyphs::APOSTROPHE,
        );
        // columns 2-3 occupied: 128 units on the left, 256 on the right
        let bounds = glyph.bounds().unwrap();
        assert_eq!((bounds.x0, bounds.x1), (128.0, 256.0));
        assert_eq!(glyph.advance(), 512);
        // the tail in row 4 stays under column 2
        let tail = glyph
            .contours()
            .iter()
            .flatten()
            .filter(|pt| pt.y == 704.0)
            .map(|pt| pt.x)
            .collect::<Vec<_>>();
        assert_eq!(tail.len(), 2);
        assert!(tail.contains(&128.0) && tail.contains(&192.0), "{tail:?}");
    }

    #[test]
    fn left_bearing_adjusts_advance() {
        let mut engine = engine();
        let glyph = engine.create_glyph(0x2E, None);
        glyph.import_outline(&GlyphShape {
            width: 512,
            height: 1024,
            squares: vec![crate::PixelSquare {
                x: 320,
                y: 0,
                size: 64,
            }],
        });
        glyph.set_advance(512);
        // the square lands at 128..192
        glyph.set_left_side_bearing(64);
        assert_eq!(glyph.bounds().unwrap().x0, 64.0);
        assert_eq!(glyph.advance(), 448);
        glyph.set_right_side_bearing(64);
        assert_eq!(glyph.advance(), 192);
    }

    #[test]
    fn bearings_ignore_empty_outline() {
        let mut engine = engine();
        let glyph = engine.create_glyph(0x20, Some("space"));
        glyph.set_advance(512);
        glyph.set_left_side_bearing(100);
        glyph.set_right_side_bearing(100);
        assert_eq!(glyph.advance(), 512);
        assert_eq!(glyph.name(), Some("space"));
    }

    #[test]
    fn full_block_is_one_rectangle() {
        let mut engine = engine();
        let glyph = import(&mut engine, 0xDB, bitfont_test_data::glyphs::FULL_BLOCK);
        assert_eq!(
            glyph.contours(),
            &[outline::rect_contour(Rect::new(0.0, 0.0, 512.0, 1024.0))]
        );
    }

    #[test]
    fn zero_has_a_counter() {
        let mut engine = engine();
        let glyph = import(&mut engine, 0x30, bitfont_test_data::glyphs::DIGIT_ZERO);
        assert!(glyph.contours().len() >= 2);
    }

    #[test]
    fn create_replaces() {
        let mut engine = engine();
        import(&mut engine, 0x20, bitfont_test_data::glyphs::SPACE);
        assert!(!engine.glyph(0x20).unwrap().contours().is_empty());
        engine.create_glyph(0x20, Some("space")).set_advance(512);
        let space = engine.glyph(0x20).unwrap();
        assert!(space.contours().is_empty());
        assert_eq!(engine.glyph_count(), 1);
    }

    #[test]
    fn compile_and_read_back() {
        let mut engine = engine();
        import(&mut engine, 0x41, bitfont_test_data::glyphs::LATIN_A);
        import(&mut engine, 0x01, bitfont_test_data::glyphs::CHECKERBOARD);
        engine.create_glyph(0x20, Some("space")).set_advance(512);
        engine.auto_hint();
        let data = engine.compile().unwrap();

        let font = FontRef::new(&data).unwrap();
        let head = font.head().unwrap();
        assert_eq!(head.units_per_em(), 1024);
        assert!(head.flags().contains(Flags::FORCE_INTEGER_PPEM));
        assert_eq!((head.x_min(), head.y_max()), (0, 1024));
        assert_eq!(font.maxp().unwrap().num_glyphs(), 4);
        assert!(font.table_data(Tag::new(b"gasp")).is_some());

        // gid order is .notdef, then codepoint order
        let cmap = font.cmap().unwrap();
        assert_eq!(cmap.map_codepoint(0x01u32), Some(GlyphId::new(1)));
        assert_eq!(cmap.map_codepoint(0x20u32), Some(GlyphId::new(2)));
        assert_eq!(cmap.map_codepoint(0x41u32), Some(GlyphId::new(3)));
        assert_eq!(cmap.map_codepoint(0x42u32), None);

        let hmtx = font.hmtx().unwrap();
        let advances = hmtx
            .h_metrics()
            .iter()
            .map(|m| m.advance())
            .collect::<Vec<_>>();
        assert_eq!(advances, vec![512; 4]);

        let glyf = font.glyf().unwrap();
        let loca = font.loca(None).unwrap();
        assert!(loca.get_glyf(GlyphId::new(2), &glyf).unwrap().is_none());
        let Some(Glyph::Simple(checkers)) = loca.get_glyf(GlyphId::new(1), &glyf).unwrap() else {
            panic!("expected a simple glyph");
        };
        // 64 isolated pixels
        assert_eq!(checkers.end_pts_of_contours().len(), 64);
        assert_eq!(checkers.num_points(), 256);
        // hinting never adds bytecode
        assert_eq!(checkers.instruction_length(), 0);
    }

    #[test]
    fn checksum_adjustment() {
        let mut engine = engine();
        import(&mut engine, 0x4C, bitfont_test_data::glyphs::LATIN_L);
        let data = engine.compile().unwrap();
        // the whole font sums to the magic number
        assert_eq!(compute_checksum(&data), CHECKSUM_MAGIC);
    }
}
