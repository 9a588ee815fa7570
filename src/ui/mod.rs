pub mod bar;
pub mod canvas;
pub mod compose;
pub mod layout;
pub mod report;
pub mod theme;
