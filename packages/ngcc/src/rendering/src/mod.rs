pub mod commonjs_rendering_formatter;
pub mod esm5_rendering_formatter;
pub mod esm_rendering_formatter;
pub mod magic_string;
pub mod renderer;
pub mod rendering_formatter;
pub mod umd_rendering_formatter;

pub use commonjs_rendering_formatter::CommonJsRenderingFormatter;
pub use esm5_rendering_formatter::Esm5RenderingFormatter;
pub use esm_rendering_formatter::EsmRenderingFormatter;
pub use magic_string::{GeneratedOutput, InsertionSide, MagicString};
pub use renderer::{FileToWrite, Renderer};
pub use rendering_formatter::{
    formatter_for, ExportInfo, Import, ModuleWithProvidersInfo, RenderingFormatter,
};
pub use umd_rendering_formatter::UmdRenderingFormatter;
