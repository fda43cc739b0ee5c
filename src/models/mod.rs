pub mod annotation;
pub mod geometry;
pub mod placement;
pub mod problem;
pub mod report;
pub mod word;

pub use annotation::{
    Annotation, AnnotationHandle, AnnotationKind, AnnotationRef, AnnotationSpec, AnnotationStyle,
    TextAlignment,
};
pub use geometry::{bounding_rect, PageBox, PageBoxKind, Quad, Rect, Rotation};
pub use placement::{Placement, ResolvedGeometry};
pub use problem::{Position, Problem};
pub use report::{AppendedPage, CleanupStats, RunOutcome, RunReport, SkipReason, SkippedItem};
pub use word::{ProblemStart, WordRecord};
