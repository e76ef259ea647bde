//! Call-site attribution
//!
//! The logging macros capture `file!()`, `line!()` and the enclosing function
//! at the call site, so records point at the code that logged rather than at
//! the facade.

use std::fmt;

/// Source location of a logging call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    file: &'static str,
    line: u32,
    function: Option<&'static str>,
}

impl Caller {
    pub const fn new(file: &'static str, line: u32, function: Option<&'static str>) -> Self {
        Self {
            file,
            line,
            function,
        }
    }

    pub fn file(&self) -> &'static str {
        self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn function(&self) -> Option<&'static str> {
        self.function
    }
}

/// Renders `dir/file.rs:line.function()`; an unknown function leaves the
/// parentheses empty: `dir/file.rs:line.()`.
impl fmt::Display for Caller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}.{}()",
            trim_path(self.file),
            self.line,
            self.function.unwrap_or_default()
        )
    }
}

fn trim_path(path: &str) -> &str {
    let is_sep = |c: char| c == '/' || c == '\\';
    let Some(last) = path.rfind(is_sep) else {
        return path;
    };
    match path[..last].rfind(is_sep) {
        Some(prev) => &path[prev + 1..],
        None => path,
    }
}

/// Bare function name from the type name of a marker fn nested in it
///
/// `app::server::handle::{{closure}}::__stamplog_here` becomes `handle`.
pub fn function_name(marker_type_name: &'static str) -> &'static str {
    let mut path = marker_type_name
        .rsplit_once("::")
        .map_or(marker_type_name, |(head, _)| head);
    while let Some(stripped) = path.strip_suffix("::{{closure}}") {
        path = stripped;
    }
    path.rsplit_once("::").map_or(path, |(_, name)| name)
}

/// Capture the current call site, including the enclosing function name
#[macro_export]
macro_rules! caller {
    () => {{
        fn __stamplog_here() {}
        $crate::Caller::new(
            ::core::file!(),
            ::core::line!(),
            ::core::option::Option::Some($crate::caller::function_name(
                ::core::any::type_name_of_val(&__stamplog_here),
            )),
        )
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_keeps_last_two_segments() {
        let caller = Caller::new("crates/app/src/server.rs", 42, Some("serve"));
        assert_eq!(caller.to_string(), "src/server.rs:42.serve()");
    }

    #[test]
    fn test_short_paths() {
        assert_eq!(Caller::new("main.rs", 1, Some("main")).to_string(), "main.rs:1.main()");
        assert_eq!(Caller::new("src/main.rs", 7, Some("run")).to_string(), "src/main.rs:7.run()");
        assert_eq!(
            Caller::new("C:\\work\\app\\src\\lib.rs", 3, Some("init")).to_string(),
            "src\\lib.rs:3.init()"
        );
    }

    #[test]
    fn test_unknown_function_keeps_call_shape() {
        let caller = Caller::new("crates/app/src/server.rs", 42, None);
        assert_eq!(caller.to_string(), "src/server.rs:42.()");
    }

    #[test]
    fn test_display_with_function() {
        let caller = Caller::new("crates/app/src/server.rs", 42, Some("handle"));
        assert_eq!(caller.to_string(), "src/server.rs:42.handle()");
    }

    #[test]
    fn test_function_name_strips_marker_and_closures() {
        assert_eq!(function_name("app::server::handle::__stamplog_here"), "handle");
        assert_eq!(
            function_name("app::server::handle::{{closure}}::{{closure}}::__stamplog_here"),
            "handle"
        );
        assert_eq!(function_name("main::__stamplog_here"), "main");
    }

    #[test]
    fn test_caller_macro_resolves_enclosing_function() {
        fn outer_function() -> Caller {
            crate::caller!()
        }

        let caller = outer_function();
        assert_eq!(caller.function(), Some("outer_function"));
        assert!(caller.file().ends_with("caller.rs"));
        assert!(caller.to_string().ends_with(".outer_function()"));
    }

    #[test]
    fn test_caller_macro_inside_closure() {
        let capture = || crate::caller!();
        let caller = capture();
        assert_eq!(
            caller.function(),
            Some("test_caller_macro_inside_closure")
        );
    }
}
