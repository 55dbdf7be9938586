pub mod token_dictionary;

pub use token_dictionary::{
    ensure_dictionary,
    init_vibrato,
    load_dictionary,
    DictType,
};
