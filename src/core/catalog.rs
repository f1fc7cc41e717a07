//! DMC stranded cotton reference catalog
//!
//! The catalog seeds the thread collection with one record per palette
//! entry. It also maps color names to an approximate RGB swatch for display;
//! that swatch is never persisted.

use std::fmt;

/// One palette entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub number: &'static str,
    pub name: &'static str,
}

impl CatalogEntry {
    const fn new(number: &'static str, name: &'static str) -> Self {
        Self { number, name }
    }

    /// The natural key used for thread colors: `"{number} - {name}"`
    pub fn composite(&self) -> String {
        format!("{} - {}", self.number, self.name)
    }
}

/// Brand recorded on seeded threads
pub const CATALOG_BRAND: &str = "DMC";

static ENTRIES: &[CatalogEntry] = &[
    CatalogEntry::new("B5200", "Snow White"),
    CatalogEntry::new("blanc", "White"),
    CatalogEntry::new("ecru", "Ecru"),
    CatalogEntry::new("150", "Dusty Rose Ultra Very Dark"),
    CatalogEntry::new("151", "Dusty Rose Very Light"),
    CatalogEntry::new("152", "Shell Pink Medium Light"),
    CatalogEntry::new("153", "Violet Very Light"),
    CatalogEntry::new("154", "Grape Very Dark"),
    CatalogEntry::new("155", "Blue Violet Medium Dark"),
    CatalogEntry::new("156", "Blue Violet Medium Light"),
    CatalogEntry::new("157", "Cornflower Blue Very Light"),
    CatalogEntry::new("158", "Cornflower Blue Medium Very Dark"),
    CatalogEntry::new("159", "Blue Gray Light"),
    CatalogEntry::new("160", "Blue Gray Medium"),
    CatalogEntry::new("161", "Blue Gray"),
    CatalogEntry::new("208", "Lavender Very Dark"),
    CatalogEntry::new("209", "Lavender Dark"),
    CatalogEntry::new("210", "Lavender Medium"),
    CatalogEntry::new("211", "Lavender Light"),
    CatalogEntry::new("221", "Shell Pink Very Dark"),
    CatalogEntry::new("223", "Shell Pink Light"),
    CatalogEntry::new("224", "Shell Pink Very Light"),
    CatalogEntry::new("225", "Shell Pink Ultra Very Light"),
    CatalogEntry::new("300", "Mahogany Very Dark"),
    CatalogEntry::new("301", "Mahogany Medium"),
    CatalogEntry::new("304", "Red Medium"),
    CatalogEntry::new("307", "Lemon"),
    CatalogEntry::new("309", "Rose Dark"),
    CatalogEntry::new("310", "Black"),
    CatalogEntry::new("311", "Wedgewood Ultra Very Dark"),
    CatalogEntry::new("312", "Baby Blue Very Dark"),
    CatalogEntry::new("315", "Antique Mauve Medium Dark"),
    CatalogEntry::new("316", "Antique Mauve Medium"),
    CatalogEntry::new("317", "Pewter Gray"),
    CatalogEntry::new("318", "Steel Gray Light"),
    CatalogEntry::new("319", "Pistachio Green Very Dark"),
    CatalogEntry::new("320", "Pistachio Green Medium"),
    CatalogEntry::new("321", "Red"),
    CatalogEntry::new("322", "Baby Blue Dark"),
    CatalogEntry::new("326", "Rose Very Dark"),
    CatalogEntry::new("327", "Violet Dark"),
    CatalogEntry::new("333", "Blue Violet Very Dark"),
    CatalogEntry::new("334", "Baby Blue Medium"),
    CatalogEntry::new("335", "Rose"),
    CatalogEntry::new("336", "Navy Blue"),
    CatalogEntry::new("340", "Blue Violet Medium"),
    CatalogEntry::new("341", "Blue Violet Light"),
    CatalogEntry::new("347", "Salmon Very Dark"),
    CatalogEntry::new("349", "Coral Dark"),
    CatalogEntry::new("350", "Coral Medium"),
    CatalogEntry::new("351", "Coral"),
    CatalogEntry::new("352", "Coral Light"),
    CatalogEntry::new("353", "Peach"),
    CatalogEntry::new("355", "Terra Cotta Dark"),
    CatalogEntry::new("356", "Terra Cotta Medium"),
    CatalogEntry::new("367", "Pistachio Green Dark"),
    CatalogEntry::new("368", "Pistachio Green Light"),
    CatalogEntry::new("369", "Pistachio Green Very Light"),
    CatalogEntry::new("370", "Mustard Medium"),
    CatalogEntry::new("371", "Mustard"),
    CatalogEntry::new("372", "Mustard Light"),
    CatalogEntry::new("400", "Mahogany Dark"),
    CatalogEntry::new("402", "Mahogany Very Light"),
    CatalogEntry::new("407", "Desert Sand Dark"),
    CatalogEntry::new("413", "Pewter Gray Dark"),
    CatalogEntry::new("414", "Steel Gray Dark"),
    CatalogEntry::new("415", "Pearl Gray"),
    CatalogEntry::new("420", "Hazelnut Brown Dark"),
    CatalogEntry::new("422", "Hazelnut Brown Light"),
    CatalogEntry::new("433", "Brown Medium"),
    CatalogEntry::new("434", "Brown Light"),
    CatalogEntry::new("435", "Brown Very Light"),
    CatalogEntry::new("436", "Tan"),
    CatalogEntry::new("437", "Tan Light"),
    CatalogEntry::new("444", "Lemon Dark"),
    CatalogEntry::new("445", "Lemon Light"),
    CatalogEntry::new("451", "Shell Gray Dark"),
    CatalogEntry::new("452", "Shell Gray Medium"),
    CatalogEntry::new("453", "Shell Gray Light"),
    CatalogEntry::new("469", "Avocado Green"),
    CatalogEntry::new("470", "Avocado Green Light"),
    CatalogEntry::new("471", "Avocado Green Very Light"),
    CatalogEntry::new("472", "Avocado Green Ultra Light"),
    CatalogEntry::new("498", "Red Dark"),
    CatalogEntry::new("500", "Blue Green Very Dark"),
    CatalogEntry::new("501", "Blue Green Dark"),
    CatalogEntry::new("502", "Blue Green"),
    CatalogEntry::new("503", "Blue Green Medium"),
    CatalogEntry::new("504", "Blue Green Very Light"),
    CatalogEntry::new("517", "Wedgewood Dark"),
    CatalogEntry::new("518", "Wedgewood Light"),
    CatalogEntry::new("519", "Sky Blue"),
    CatalogEntry::new("520", "Fern Green Dark"),
    CatalogEntry::new("522", "Fern Green"),
    CatalogEntry::new("523", "Fern Green Light"),
    CatalogEntry::new("524", "Fern Green Very Light"),
    CatalogEntry::new("535", "Ash Gray Very Light"),
    CatalogEntry::new("550", "Violet Very Dark"),
    CatalogEntry::new("552", "Violet Medium"),
    CatalogEntry::new("553", "Violet"),
    CatalogEntry::new("554", "Violet Light"),
    CatalogEntry::new("561", "Jade Very Dark"),
    CatalogEntry::new("562", "Jade Medium"),
    CatalogEntry::new("563", "Jade Light"),
    CatalogEntry::new("564", "Jade Very Light"),
    CatalogEntry::new("598", "Turquoise Light"),
    CatalogEntry::new("600", "Cranberry Very Dark"),
    CatalogEntry::new("601", "Cranberry Dark"),
    CatalogEntry::new("602", "Cranberry Medium"),
    CatalogEntry::new("603", "Cranberry"),
    CatalogEntry::new("604", "Cranberry Light"),
    CatalogEntry::new("605", "Cranberry Very Light"),
    CatalogEntry::new("606", "Bright Orange-Red"),
    CatalogEntry::new("608", "Bright Orange"),
    CatalogEntry::new("610", "Drab Brown Dark"),
    CatalogEntry::new("611", "Drab Brown"),
    CatalogEntry::new("612", "Drab Brown Light"),
    CatalogEntry::new("613", "Drab Brown Very Light"),
    CatalogEntry::new("640", "Beige Gray Very Dark"),
    CatalogEntry::new("642", "Beige Gray Dark"),
    CatalogEntry::new("644", "Beige Gray Medium"),
    CatalogEntry::new("645", "Beaver Gray Very Dark"),
    CatalogEntry::new("646", "Beaver Gray Dark"),
    CatalogEntry::new("647", "Beaver Gray Medium"),
    CatalogEntry::new("648", "Beaver Gray Light"),
    CatalogEntry::new("666", "Bright Red"),
    CatalogEntry::new("676", "Old Gold Light"),
    CatalogEntry::new("677", "Old Gold Very Light"),
    CatalogEntry::new("680", "Old Gold Dark"),
    CatalogEntry::new("699", "Green"),
    CatalogEntry::new("700", "Green Bright"),
    CatalogEntry::new("701", "Green Light"),
    CatalogEntry::new("702", "Kelly Green"),
    CatalogEntry::new("703", "Chartreuse"),
    CatalogEntry::new("704", "Chartreuse Bright"),
    CatalogEntry::new("712", "Cream"),
    CatalogEntry::new("718", "Plum"),
    CatalogEntry::new("720", "Orange Spice Dark"),
    CatalogEntry::new("721", "Orange Spice Medium"),
    CatalogEntry::new("722", "Orange Spice Light"),
    CatalogEntry::new("725", "Topaz Medium Light"),
    CatalogEntry::new("726", "Topaz Light"),
    CatalogEntry::new("727", "Topaz Very Light"),
    CatalogEntry::new("728", "Topaz"),
    CatalogEntry::new("729", "Old Gold Medium"),
    CatalogEntry::new("730", "Olive Green Very Dark"),
    CatalogEntry::new("732", "Olive Green"),
    CatalogEntry::new("733", "Olive Green Medium"),
    CatalogEntry::new("734", "Olive Green Light"),
    CatalogEntry::new("738", "Tan Very Light"),
    CatalogEntry::new("739", "Tan Ultra Very Light"),
    CatalogEntry::new("740", "Tangerine"),
    CatalogEntry::new("741", "Tangerine Medium"),
    CatalogEntry::new("742", "Tangerine Light"),
    CatalogEntry::new("743", "Yellow Medium"),
    CatalogEntry::new("744", "Yellow Pale"),
    CatalogEntry::new("745", "Yellow Light Pale"),
    CatalogEntry::new("746", "Off White"),
    CatalogEntry::new("747", "Peacock Blue Very Light"),
    CatalogEntry::new("754", "Peach Light"),
    CatalogEntry::new("760", "Salmon"),
    CatalogEntry::new("761", "Salmon Light"),
    CatalogEntry::new("762", "Pearl Gray Very Light"),
    CatalogEntry::new("775", "Baby Blue Very Light"),
    CatalogEntry::new("776", "Pink Medium"),
    CatalogEntry::new("778", "Antique Mauve Very Light"),
    CatalogEntry::new("780", "Topaz Ultra Very Dark"),
    CatalogEntry::new("781", "Topaz Very Dark"),
    CatalogEntry::new("782", "Topaz Dark"),
    CatalogEntry::new("783", "Topaz Medium"),
    CatalogEntry::new("791", "Cornflower Blue Very Dark"),
    CatalogEntry::new("792", "Cornflower Blue Dark"),
    CatalogEntry::new("793", "Cornflower Blue Medium"),
    CatalogEntry::new("794", "Cornflower Blue Light"),
    CatalogEntry::new("796", "Royal Blue Dark"),
    CatalogEntry::new("797", "Royal Blue"),
    CatalogEntry::new("798", "Delft Blue Dark"),
    CatalogEntry::new("799", "Delft Blue Medium"),
    CatalogEntry::new("800", "Delft Blue Pale"),
    CatalogEntry::new("801", "Coffee Brown Dark"),
    CatalogEntry::new("806", "Peacock Blue Dark"),
    CatalogEntry::new("807", "Peacock Blue"),
    CatalogEntry::new("809", "Delft Blue"),
    CatalogEntry::new("814", "Garnet Dark"),
    CatalogEntry::new("815", "Garnet Medium"),
    CatalogEntry::new("816", "Garnet"),
    CatalogEntry::new("817", "Coral Red Very Dark"),
    CatalogEntry::new("818", "Baby Pink"),
    CatalogEntry::new("819", "Baby Pink Light"),
    CatalogEntry::new("820", "Royal Blue Very Dark"),
];

/// The full palette in catalog order
pub fn entries() -> &'static [CatalogEntry] {
    ENTRIES
}

/// Find a palette entry by its number (case-insensitive, so `BLANC` works)
pub fn lookup(number: &str) -> Option<&'static CatalogEntry> {
    ENTRIES
        .iter()
        .find(|e| e.number.eq_ignore_ascii_case(number.trim()))
}

/// Approximate display color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    fn darken(self, factor: f32) -> Self {
        let scale = |c: u8| (c as f32 * factor).round() as u8;
        Self::new(scale(self.r), scale(self.g), scale(self.b))
    }

    fn lighten(self, amount: f32) -> Self {
        let lift = |c: u8| (c as f32 + (255.0 - c as f32) * amount).round() as u8;
        Self::new(lift(self.r), lift(self.g), lift(self.b))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Hue keywords, most specific first
const HUES: &[(&str, Rgb)] = &[
    ("snow white", Rgb::new(255, 255, 255)),
    ("off white", Rgb::new(250, 248, 240)),
    ("white", Rgb::new(255, 255, 255)),
    ("black", Rgb::new(0, 0, 0)),
    ("ecru", Rgb::new(240, 234, 218)),
    ("shell pink", Rgb::new(210, 140, 140)),
    ("baby pink", Rgb::new(250, 200, 210)),
    ("dusty rose", Rgb::new(200, 110, 120)),
    ("antique mauve", Rgb::new(180, 110, 130)),
    ("orange-red", Rgb::new(240, 80, 40)),
    ("orange spice", Rgb::new(230, 110, 40)),
    ("coral red", Rgb::new(190, 40, 50)),
    ("terra cotta", Rgb::new(190, 100, 70)),
    ("desert sand", Rgb::new(200, 140, 110)),
    ("hazelnut brown", Rgb::new(170, 120, 60)),
    ("coffee brown", Rgb::new(100, 60, 40)),
    ("drab brown", Rgb::new(150, 130, 90)),
    ("old gold", Rgb::new(200, 160, 60)),
    ("blue violet", Rgb::new(110, 100, 170)),
    ("blue green", Rgb::new(80, 140, 130)),
    ("blue gray", Rgb::new(110, 130, 150)),
    ("baby blue", Rgb::new(140, 180, 220)),
    ("sky blue", Rgb::new(130, 190, 220)),
    ("royal blue", Rgb::new(40, 70, 170)),
    ("navy blue", Rgb::new(20, 40, 90)),
    ("delft blue", Rgb::new(90, 130, 190)),
    ("peacock blue", Rgb::new(30, 160, 180)),
    ("cornflower blue", Rgb::new(100, 120, 190)),
    ("steel gray", Rgb::new(130, 135, 140)),
    ("pearl gray", Rgb::new(200, 200, 200)),
    ("ash gray", Rgb::new(180, 185, 180)),
    ("shell gray", Rgb::new(170, 165, 160)),
    ("beaver gray", Rgb::new(130, 125, 115)),
    ("beige gray", Rgb::new(170, 160, 140)),
    ("pewter", Rgb::new(120, 120, 125)),
    ("kelly green", Rgb::new(40, 160, 60)),
    ("pistachio", Rgb::new(100, 160, 90)),
    ("avocado", Rgb::new(110, 130, 40)),
    ("olive", Rgb::new(120, 120, 50)),
    ("fern", Rgb::new(130, 150, 100)),
    ("chartreuse", Rgb::new(150, 200, 40)),
    ("jade", Rgb::new(30, 150, 110)),
    ("turquoise", Rgb::new(60, 190, 190)),
    ("wedgewood", Rgb::new(60, 110, 150)),
    ("lavender", Rgb::new(170, 140, 200)),
    ("violet", Rgb::new(130, 80, 160)),
    ("grape", Rgb::new(90, 40, 100)),
    ("plum", Rgb::new(140, 40, 110)),
    ("cranberry", Rgb::new(200, 40, 100)),
    ("garnet", Rgb::new(140, 20, 40)),
    ("mahogany", Rgb::new(140, 60, 30)),
    ("salmon", Rgb::new(240, 128, 114)),
    ("coral", Rgb::new(230, 95, 80)),
    ("peach", Rgb::new(250, 190, 160)),
    ("rose", Rgb::new(220, 110, 130)),
    ("pink", Rgb::new(245, 170, 190)),
    ("red", Rgb::new(200, 30, 45)),
    ("tangerine", Rgb::new(250, 150, 40)),
    ("orange", Rgb::new(240, 120, 30)),
    ("topaz", Rgb::new(230, 170, 50)),
    ("mustard", Rgb::new(190, 160, 70)),
    ("lemon", Rgb::new(250, 230, 80)),
    ("yellow", Rgb::new(250, 220, 90)),
    ("cream", Rgb::new(250, 240, 200)),
    ("tan", Rgb::new(210, 170, 120)),
    ("brown", Rgb::new(120, 80, 50)),
    ("green", Rgb::new(60, 150, 60)),
    ("blue", Rgb::new(60, 100, 190)),
    ("gray", Rgb::new(128, 128, 128)),
];

enum Shade {
    Darken(f32),
    Lighten(f32),
}

/// Shade qualifiers, most specific first
const SHADES: &[(&str, Shade)] = &[
    ("ultra very dark", Shade::Darken(0.45)),
    ("very dark", Shade::Darken(0.6)),
    ("medium dark", Shade::Darken(0.9)),
    ("dark", Shade::Darken(0.75)),
    ("ultra very light", Shade::Lighten(0.7)),
    ("ultra light", Shade::Lighten(0.65)),
    ("very light", Shade::Lighten(0.5)),
    ("medium light", Shade::Lighten(0.15)),
    ("light", Shade::Lighten(0.3)),
    ("pale", Shade::Lighten(0.4)),
];

const FALLBACK: Rgb = Rgb::new(128, 128, 128);

/// Map a catalog color name to an approximate swatch color
///
/// Unknown names fall back to a neutral gray.
pub fn display_color(name: &str) -> Rgb {
    let lower = name.to_lowercase();

    let base = HUES
        .iter()
        .find(|(keyword, _)| lower.contains(keyword))
        .map(|(_, rgb)| *rgb)
        .unwrap_or(FALLBACK);

    match SHADES.iter().find(|(keyword, _)| lower.contains(keyword)) {
        Some((_, Shade::Darken(factor))) => base.darken(*factor),
        Some((_, Shade::Lighten(amount))) => base.lighten(*amount),
        None => base,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_is_stable_across_calls() {
        assert_eq!(entries(), entries());
        assert!(!entries().is_empty());
    }

    #[test]
    fn test_composite_keys_are_unique() {
        let keys: HashSet<String> = entries().iter().map(|e| e.composite()).collect();
        assert_eq!(keys.len(), entries().len());
    }

    #[test]
    fn test_composite_format() {
        let black = lookup("310").unwrap();
        assert_eq!(black.composite(), "310 - Black");
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(lookup("BLANC").unwrap().name, "White");
        assert!(lookup("99999").is_none());
    }

    #[test]
    fn test_display_color_basics() {
        assert_eq!(display_color("Black"), Rgb::new(0, 0, 0));
        assert_eq!(display_color("Snow White"), Rgb::new(255, 255, 255));
        assert_eq!(display_color("Red"), Rgb::new(200, 30, 45));
    }

    #[test]
    fn test_display_color_shades() {
        let base = display_color("Red");
        let dark = display_color("Red Dark");
        let light = display_color("Coral Light");
        assert!(dark.r < base.r);
        assert!(light.g > display_color("Coral").g);
    }

    #[test]
    fn test_display_color_is_deterministic() {
        for entry in entries() {
            assert_eq!(display_color(entry.name), display_color(entry.name));
        }
    }

    #[test]
    fn test_display_color_unknown_is_gray() {
        assert_eq!(display_color("Mystery Shade"), FALLBACK);
    }

    #[test]
    fn test_rgb_hex_display() {
        assert_eq!(Rgb::new(255, 0, 16).to_string(), "#ff0010");
    }
}
