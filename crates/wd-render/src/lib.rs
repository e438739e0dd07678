pub mod display;
pub mod handles;
pub mod hit;

pub use display::{DisplayItem, DisplayList, HandleItem, Overlay, build_display_list};
pub use handles::ResizeHandle;
pub use hit::{hit_test, hit_test_handle, hit_test_rect};
