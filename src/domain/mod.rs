//! Domain - Pure Data Structures
//!
//! Site data derived from translations; nothing here holds state.

pub mod category;

pub use category::{
    CategoryMetadata, Translate, generate_category_display_name, generate_category_metadata,
    get_category_icon, humanize_category_id,
};
