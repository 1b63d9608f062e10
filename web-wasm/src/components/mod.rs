pub mod export_buttons;
pub mod header;
pub mod review_panel;
pub mod upload_area;
