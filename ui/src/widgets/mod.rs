mod qr_card;
mod scan_view;
mod status_banner;

pub use qr_card::qr_card;
pub use scan_view::scan_view;
pub use status_banner::status_banner;
