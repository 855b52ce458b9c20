/// Display label for a block identifier: `log_spruce` becomes `log spruce`.
pub fn label(id: &str) -> String {
    id.replace('_', " ")
}
