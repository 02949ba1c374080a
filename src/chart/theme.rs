/// An sRGB colour triple
pub type Rgb = (u8, u8, u8);

pub const STEEL_BLUE: Rgb = (70, 130, 180);
pub const CORAL: Rgb = (255, 127, 80);
pub const TEAL: Rgb = (0, 128, 128);
pub const SKY_BLUE: Rgb = (135, 206, 235);
pub const SALMON: Rgb = (250, 128, 114);

/// Immutable styling shared by every chart of a run
#[derive(Debug, Clone, PartialEq)]
pub struct PlotTheme {
    /// Pixels per inch of figure size
    pub dpi: u32,
    pub font_family: String,
    pub title_size: f64,
    pub label_size: f64,
    pub annotation_size: f64,
    /// Opacity of horizontal grid lines
    pub grid_alpha: f64,
    /// Opacity of bar fills
    pub bar_alpha: f64,
    pub mean_line: Rgb,
    pub median_line: Rgb,
    pub annotation_fill: Rgb,
}

impl Default for PlotTheme {
    fn default() -> Self {
        Self {
            dpi: 300,
            font_family: "sans-serif".to_string(),
            title_size: 22.0,
            label_size: 16.0,
            annotation_size: 14.0,
            grid_alpha: 0.3,
            bar_alpha: 0.8,
            mean_line: (220, 20, 60),
            median_line: (34, 139, 34),
            annotation_fill: (245, 222, 179),
        }
    }
}

impl PlotTheme {
    pub fn with_dpi(self, dpi: u32) -> Self {
        Self { dpi, ..self }
    }

    /// Pixel dimensions of a figure given in inches
    pub fn pixels(&self, size_in: (f64, f64)) -> (u32, u32) {
        let scale = f64::from(self.dpi.max(1));
        (
            (size_in.0 * scale).round().max(1.0) as u32,
            (size_in.1 * scale).round().max(1.0) as u32,
        )
    }
}
