mod select_loops;
pub use select_loops::SelectLoopsPass;
