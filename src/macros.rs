use crate::{Config, Result};

/// Builds a [`Config`](crate::Config) from a literal tree.
///
/// Sections map to braces of `"option" => value` pairs. A bracketed value
/// becomes a list, anything else a single value; every element goes through
/// [`Value::from`](crate::Value), so the option's kind follows the Rust type.
/// Evaluates to `Result<Config>`, failing on invalid or duplicate names and on
/// lists that mix kinds.
///
/// # Examples
///
/// ```rust
/// use typed_ini::ini;
///
/// let config = ini! {
///     "server" => {
///         "host" => "example.org",
///         "port" => 8080u64,
///         "aliases" => ["www", "web"],
///     },
///     "empty" => {},
/// }
/// .unwrap();
///
/// assert_eq!(config.get_value::<u64>("server", "port").unwrap(), 8080);
/// assert_eq!(config.len(), 2);
/// ```
#[macro_export]
macro_rules! ini {
    // Handle end of section body
    (@options $section:ident) => {};

    // Handle list values
    (@options $section:ident $option:literal => [ $($elem:expr),* $(,)? ] $(, $($rest:tt)*)?) => {
        $section.insert($crate::ConfigOption::new(
            $option,
            $crate::OptionValue::List(vec![$($crate::Value::from($elem)),*]),
        )?)?;
        $crate::ini!(@options $section $($($rest)*)?);
    };

    // Handle single values
    (@options $section:ident $option:literal => $value:expr $(, $($rest:tt)*)?) => {
        $section.insert($crate::ConfigOption::new(
            $option,
            $crate::OptionValue::Single($crate::Value::from($value)),
        )?)?;
        $crate::ini!(@options $section $($($rest)*)?);
    };

    ( $( $section:literal => { $($body:tt)* } ),* $(,)? ) => {
        $crate::__build_config(|#[allow(unused_variables)] config| {
            $(
                #[allow(unused_mut)]
                let mut section = $crate::Section::new($section)?;
                $crate::ini!(@options section $($body)*);
                config.insert(section)?;
            )*
            Ok(())
        })
    };
}

#[doc(hidden)]
pub fn build<F>(fill: F) -> Result<Config>
where
    F: FnOnce(&mut Config) -> Result<()>,
{
    let mut config = Config::new();
    fill(&mut config)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use crate::{OptionValue, Value, ValueKind};

    #[test]
    fn test_ini_macro_empty() {
        let config = ini! {}.unwrap();
        assert!(config.is_empty());

        let config = ini! { "a" => {} }.unwrap();
        assert!(config.get("a").unwrap().is_empty());
    }

    #[test]
    fn test_ini_macro_kinds() {
        let config = ini! {
            "s" => {
                "flag" => true,
                "count" => -3,
                "ratio" => 0.5,
                "name" => "x",
                "list" => [1u64, 2u64],
                "none" => [],
            }
        }
        .unwrap();

        let kind = |name: &str| config.option("s", name).unwrap().kind();
        assert_eq!(kind("flag"), ValueKind::Boolean);
        assert_eq!(kind("count"), ValueKind::Signed);
        assert_eq!(kind("ratio"), ValueKind::Float);
        assert_eq!(kind("name"), ValueKind::String);
        assert_eq!(kind("list"), ValueKind::Unsigned);
        assert_eq!(
            config.option("s", "none").unwrap().value(),
            &OptionValue::List(Vec::new())
        );
        assert_eq!(
            config.option("s", "list").unwrap().values(),
            &[Value::Unsigned(1), Value::Unsigned(2)]
        );
    }

    #[test]
    fn test_ini_macro_errors() {
        assert!(ini! { "bad name!" => {} }.is_err());
        assert!(ini! { "a" => { "x" => 1, "x" => 2 } }.is_err());
        assert!(ini! { "a" => {}, "a" => {} }.is_err());
        assert!(ini! { "a" => { "mixed" => [1, "one"] } }.is_err());
    }
}
