//! C-ABI FFI bindings for cross-language integration.
//!
//! Strings passed in must be null-terminated UTF-8. Strings handed out are
//! owned by this library and must be released with the matching free
//! function.

use std::ffi::{c_char, CStr, CString};
use std::ptr;

use crate::bionic::FixationLevel;
use crate::render::{render_document, MarkdownMode, RenderOptions};
use crate::theme::GradientTheme;

/// Result structure returned by FFI functions.
#[repr(C)]
pub struct BionicResult {
    /// Whether the operation succeeded.
    pub success: bool,
    /// The result data (null if failed). Must be freed with `bionic_free_string`.
    pub data: *mut c_char,
    /// Error message (null if succeeded). Must be freed with `bionic_free_string`.
    pub error: *mut c_char,
}

impl BionicResult {
    fn success(data: String) -> Self {
        Self {
            success: true,
            data: CString::new(data).unwrap_or_default().into_raw(),
            error: ptr::null_mut(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: ptr::null_mut(),
            error: CString::new(message.into()).unwrap_or_default().into_raw(),
        }
    }
}

/// Options for [`bionic_render_document`].
#[repr(C)]
pub struct BionicRenderOptions {
    /// Fixation level 1-5; out-of-range values are clamped.
    pub fixation: u8,
    /// Dim opacity 0.0-1.0; clamped.
    pub dim_opacity: f32,
    /// Gradient theme name (null = none).
    pub theme: *const c_char,
    /// Use dark-background palette variants.
    pub dark_mode: bool,
    /// 0 = auto-detect, 1 = always Markdown, 2 = never.
    pub markdown_mode: i32,
    /// Embed the reader stylesheet.
    pub include_stylesheet: bool,
}

impl Default for BionicRenderOptions {
    fn default() -> Self {
        Self {
            fixation: 3,
            dim_opacity: 0.5,
            theme: ptr::null(),
            dark_mode: false,
            markdown_mode: 0,
            include_stylesheet: true,
        }
    }
}

/// Borrow a C string as `&str`, naming the argument in the error.
unsafe fn read_str<'a>(ptr: *const c_char, what: &str) -> Result<&'a str, BionicResult> {
    if ptr.is_null() {
        return Err(BionicResult::error(format!("{} cannot be null", what)));
    }
    CStr::from_ptr(ptr)
        .to_str()
        .map_err(|_| BionicResult::error(format!("Invalid UTF-8 {}", what.to_lowercase())))
}

/// Convert Markdown to an HTML fragment.
///
/// # Safety
///
/// The `markdown` must be a valid null-terminated UTF-8 string.
/// The returned result must be freed with `bionic_free_result`.
#[no_mangle]
pub unsafe extern "C" fn bionic_parse_markdown(markdown: *const c_char) -> BionicResult {
    match read_str(markdown, "Markdown") {
        Ok(text) => BionicResult::success(crate::parse(text)),
        Err(result) => result,
    }
}

/// Segment plain text into bionic HTML.
///
/// # Safety
///
/// The `text` must be a valid null-terminated UTF-8 string.
/// The returned result must be freed with `bionic_free_result`.
#[no_mangle]
pub unsafe extern "C" fn bionic_process_text(text: *const c_char, fixation: u8) -> BionicResult {
    match read_str(text, "Text") {
        Ok(text) => BionicResult::success(crate::process_text(text, fixation)),
        Err(result) => result,
    }
}

/// Check whether text looks like Markdown.
///
/// # Safety
///
/// The `text` must be null or a valid null-terminated UTF-8 string.
#[no_mangle]
pub unsafe extern "C" fn bionic_is_markdown(text: *const c_char) -> bool {
    match read_str(text, "Text") {
        Ok(text) => crate::is_markdown(text),
        Err(result) => {
            bionic_free_result(result);
            false
        }
    }
}

/// Render source text into a standalone reader page.
///
/// # Safety
///
/// The `source` must be a valid null-terminated UTF-8 string.
/// The `options.theme` must be null or a valid null-terminated UTF-8 string.
/// The returned result must be freed with `bionic_free_result`.
#[no_mangle]
pub unsafe extern "C" fn bionic_render_document(
    source: *const c_char,
    options: BionicRenderOptions,
) -> BionicResult {
    let source = match read_str(source, "Source") {
        Ok(s) => s,
        Err(result) => return result,
    };

    let theme = if options.theme.is_null() {
        GradientTheme::None
    } else {
        let name = match read_str(options.theme, "Theme") {
            Ok(s) => s,
            Err(result) => return result,
        };
        match name.parse::<GradientTheme>() {
            Ok(theme) => theme,
            Err(e) => return BionicResult::error(e.to_string()),
        }
    };

    let markdown = match options.markdown_mode {
        0 => MarkdownMode::Auto,
        1 => MarkdownMode::Always,
        2 => MarkdownMode::Never,
        other => return BionicResult::error(format!("Invalid markdown mode: {}", other)),
    };

    let render_options = RenderOptions::new()
        .with_fixation(FixationLevel::clamped(options.fixation))
        .with_dim_opacity(options.dim_opacity)
        .with_theme(theme)
        .with_dark_mode(options.dark_mode)
        .with_markdown_mode(markdown)
        .with_stylesheet(options.include_stylesheet);

    BionicResult::success(render_document(source, &render_options).html)
}

/// Free a result returned by any bionic function.
///
/// # Safety
///
/// The `result` must have been returned by a bionic function.
/// This function should only be called once per result.
#[no_mangle]
pub unsafe extern "C" fn bionic_free_result(result: BionicResult) {
    if !result.data.is_null() {
        drop(CString::from_raw(result.data));
    }
    if !result.error.is_null() {
        drop(CString::from_raw(result.error));
    }
}

/// Free a string allocated by this library.
///
/// # Safety
///
/// The `ptr` must have been allocated by this library.
/// This function should only be called once per pointer.
#[no_mangle]
pub unsafe extern "C" fn bionic_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}

/// Get the library version.
///
/// The returned string is statically allocated and must not be freed.
#[no_mangle]
pub extern "C" fn bionic_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}
