use toml::{Table, Value};

use crate::config_store::ConfigError;

/// Splits a dot-separated document path, rejecting empty paths and segments.
///
/// # Errors
/// * `ConfigError::InvalidPath` - If the path or any segment is empty
pub(super) fn segments(path: &str) -> Result<Vec<&str>, ConfigError> {
    let parts: Vec<&str> = path.split('.').collect();

    if parts.iter().any(|part| part.is_empty()) {
        return Err(ConfigError::InvalidPath(format!(
            "Empty segment in path '{path}'"
        )));
    }

    Ok(parts)
}

/// Follows `parts` from the root table, descending into tables by key and
/// arrays by index.
///
/// # Errors
/// * `ConfigError::InvalidPath` - If a key is missing, an index is invalid,
///   or a scalar is reached before the path ends
pub(super) fn lookup<'a>(root: &'a Table, parts: &[&str]) -> Result<&'a Value, ConfigError> {
    let (first, rest) = parts
        .split_first()
        .ok_or_else(|| ConfigError::InvalidPath("Empty path".to_string()))?;

    let mut current = root.get(*first).ok_or_else(|| missing_key(first, &[]))?;

    for (i, part) in rest.iter().enumerate() {
        let walked = &parts[..=i];
        current = match current {
            Value::Table(table) => table.get(*part).ok_or_else(|| missing_key(part, walked))?,
            Value::Array(array) => {
                let index = parse_index(part, walked)?;
                array
                    .get(index)
                    .ok_or_else(|| out_of_bounds(index, walked))?
            }
            scalar => return Err(not_a_container(scalar, walked)),
        };
    }

    Ok(current)
}

/// Stores `new_value` at `parts`, creating intermediate tables for missing keys.
///
/// Array elements can be replaced but arrays are never grown.
///
/// # Errors
/// * `ConfigError::InvalidPath` - If an index is invalid or a scalar sits
///   where a container is needed
pub(super) fn assign(root: &mut Table, parts: &[&str], new_value: Value) -> Result<(), ConfigError> {
    let Some((last, parents)) = parts.split_last() else {
        return Err(ConfigError::InvalidPath("Empty path".to_string()));
    };

    let Some((first, middle)) = parents.split_first() else {
        root.insert((*last).to_string(), new_value);
        return Ok(());
    };

    let mut current = root
        .entry((*first).to_string())
        .or_insert_with(|| Value::Table(Table::new()));

    for (i, part) in middle.iter().enumerate() {
        current = descend_mut(current, part, &parts[..=i])?;
    }

    match current {
        Value::Table(table) => {
            table.insert((*last).to_string(), new_value);
            Ok(())
        }
        Value::Array(array) => {
            let index = parse_index(last, parents)?;
            let slot = array
                .get_mut(index)
                .ok_or_else(|| out_of_bounds(index, parents))?;
            *slot = new_value;
            Ok(())
        }
        scalar => Err(not_a_container(scalar, parents)),
    }
}

fn descend_mut<'a>(
    current: &'a mut Value,
    key: &str,
    walked: &[&str],
) -> Result<&'a mut Value, ConfigError> {
    match current {
        Value::Table(table) => Ok(table
            .entry(key.to_string())
            .or_insert_with(|| Value::Table(Table::new()))),
        Value::Array(array) => {
            let index = parse_index(key, walked)?;
            array
                .get_mut(index)
                .ok_or_else(|| out_of_bounds(index, walked))
        }
        scalar => Err(not_a_container(scalar, walked)),
    }
}

fn parse_index(key: &str, walked: &[&str]) -> Result<usize, ConfigError> {
    key.parse::<usize>().map_err(|_| {
        ConfigError::InvalidPath(format!(
            "Invalid array index '{}' at path '{}'",
            key,
            walked.join(".")
        ))
    })
}

fn missing_key(key: &str, walked: &[&str]) -> ConfigError {
    ConfigError::InvalidPath(format!(
        "Key '{}' not found in table at path '{}'",
        key,
        walked.join(".")
    ))
}

fn out_of_bounds(index: usize, walked: &[&str]) -> ConfigError {
    ConfigError::InvalidPath(format!(
        "Array index {} out of bounds at path '{}'",
        index,
        walked.join(".")
    ))
}

fn not_a_container(value: &Value, walked: &[&str]) -> ConfigError {
    ConfigError::InvalidPath(format!(
        "Cannot navigate into {} at path '{}'",
        value.type_str(),
        walked.join(".")
    ))
}
