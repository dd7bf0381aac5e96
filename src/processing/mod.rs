pub mod detection;
pub mod mapper;
pub mod mrz;
pub mod normalize;
pub mod ocr;
pub mod spans;

pub use detection::DocumentClassifier;
pub use mapper::FieldMapper;
pub use mrz::MrzParser;
pub use ocr::{OcrProvider, TesseractOcr};
pub use spans::{NoSpans, SpanProvider, StaticSpans};
