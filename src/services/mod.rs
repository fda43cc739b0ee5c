pub mod annotation_cleaner;
pub mod geometry_resolver;
pub mod page_materializer;
pub mod reading_order;
pub mod segmenter;
pub mod word_stream;

pub use annotation_cleaner::AnnotationCleaner;
pub use geometry_resolver::{GeometryResolver, MARKER_KIND};
pub use page_materializer::{InsertQueue, MaterializeReport, PageMaterializer};
pub use reading_order::ReadingOrderSorter;
pub use segmenter::ProblemSegmenter;
pub use word_stream::WordStreamExtractor;
