pub mod errors;
pub mod http;
pub mod markdown;
pub mod models;
pub mod normalize;
pub mod pipeline;
pub mod stopwords;

pub use errors::CloudError;
pub use models::{ Language, MarkdownDocument, SourceFile };
pub use normalize::NormalizeConfig;
pub use stopwords::StopwordSet;
