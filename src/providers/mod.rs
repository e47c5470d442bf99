pub mod openai;
pub mod upstream;

pub use upstream::UpstreamProvider;
