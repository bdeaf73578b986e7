pub mod area_picker;
pub mod bars;
pub mod header;
pub mod indicators;
