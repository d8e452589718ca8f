//! Receipt and share exports: JSON document, printable HTML, and the
//! short share message.

pub mod print;
pub mod receipt;
pub mod share;

pub use print::render_receipt_html;
pub use receipt::{build_receipt, receipt_file_name, ReceiptDocument};
pub use share::{share_text, truncate_tx_hash};
