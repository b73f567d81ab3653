//! Test command rewriting
//!
//! Recipe test commands are written against the build environment; inside a
//! built container the prefix is /usr/local/ and the R launcher is Rscript.

pub fn rewrite_command(command: &str) -> String {
    command
        .replace("${PREFIX}", "/usr/local/")
        .replace("$PREFIX", "/usr/local/")
        .replace("$R ", "Rscript ")
}
