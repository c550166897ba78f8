//! Configuration for SVG serialization

/// Configuration options for SVG output
#[derive(Debug, Clone, PartialEq)]
pub struct OutputConfig {
    /// Whether to emit the XML declaration before the root element
    pub xml_declaration: bool,

    /// Whether to format output with indentation
    pub pretty_print: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            xml_declaration: true,
            pretty_print: true,
        }
    }
}

impl OutputConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether the XML declaration is written
    pub fn with_xml_declaration(mut self, declaration: bool) -> Self {
        self.xml_declaration = declaration;
        self
    }

    /// Set whether to pretty-print output
    pub fn with_pretty_print(mut self, pretty: bool) -> Self {
        self.pretty_print = pretty;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = OutputConfig::default();
        assert!(config.xml_declaration);
        assert!(config.pretty_print);
    }

    #[test]
    fn test_builder_pattern() {
        let config = OutputConfig::new()
            .with_xml_declaration(false)
            .with_pretty_print(false);

        assert!(!config.xml_declaration);
        assert!(!config.pretty_print);
    }
}
