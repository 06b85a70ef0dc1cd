use crate::actions::ResultItem;

pub trait Plugin {
    /// Return result items for the text typed after the keyword
    fn search(&self, query: &str) -> Vec<ResultItem>;
    /// Name of the plugin
    fn name(&self) -> &str;
    /// Short human readable summary
    fn description(&self) -> &str {
        ""
    }
}
