//! Configuration dump as G-code comment lines.
//!
//! Any serializable configuration node is written as nested name/value
//! comments mirroring the shape of the tree:
//!
//! ```text
//! ; tool
//! ;   general
//! ;     radius = 1.5
//! ;     depth_per_cut = 1.0
//! ```
//!
//! Groups print their name on a line of their own and indent their children
//! by two more spaces. Leaves print `name = value`. Fields come out in
//! declaration order.

use crate::error::ConfigResult;
use serde::Serialize;
use serde_json::Value;
use std::io::Write;

/// Prefix starting every comment line.
pub const COMMENT_PREFIX: &str = "; ";

const INDENT: &str = "  ";

/// Writes `node` named `name` as comment lines to `output`.
pub fn write_comments<T, W>(name: &str, node: &T, output: &mut W) -> ConfigResult<()>
where
    T: Serialize + ?Sized,
    W: Write + ?Sized,
{
    let value = serde_json::to_value(node)?;
    write_value(name, &value, "", output)
}

/// Returns the comment lines for `node` as one string.
pub fn to_comments<T>(name: &str, node: &T) -> ConfigResult<String>
where
    T: Serialize + ?Sized,
{
    let mut buffer = Vec::new();
    write_comments(name, node, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

fn write_value<W>(name: &str, value: &Value, prefix: &str, output: &mut W) -> ConfigResult<()>
where
    W: Write + ?Sized,
{
    match value {
        Value::Object(children) => {
            writeln!(output, "{COMMENT_PREFIX}{prefix}{name}")?;
            let child_prefix = format!("{prefix}{INDENT}");
            for (child_name, child) in children {
                write_value(child_name, child, &child_prefix, output)?;
            }
        }
        Value::Array(items) => {
            writeln!(output, "{COMMENT_PREFIX}{prefix}{name}")?;
            let child_prefix = format!("{prefix}{INDENT}");
            for (index, item) in items.iter().enumerate() {
                write_value(&index.to_string(), item, &child_prefix, output)?;
            }
        }
        Value::String(text) => writeln!(output, "{COMMENT_PREFIX}{prefix}{name} = {text}")?,
        Value::Null => writeln!(output, "{COMMENT_PREFIX}{prefix}{name} =")?,
        scalar => writeln!(output, "{COMMENT_PREFIX}{prefix}{name} = {scalar}")?,
    }
    Ok(())
}
