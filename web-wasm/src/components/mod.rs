pub mod dictionary_panel;
pub mod error_banner;
pub mod header;
pub mod settings_panel;
pub mod text_panel;
pub mod upload_area;
