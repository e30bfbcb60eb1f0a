use crate::engine::catalogue::StatKind;
use crate::types::matches::ServeField;

/// Serve columns a statistic needs beyond identity, score and minutes,
/// which are always fetched. Unrecognised statistics need none.
pub fn required_fields(kind: StatKind) -> &'static [ServeField] {
    kind.def().map(|def| def.fields).unwrap_or(&[])
}

/// Dataset column names for both sides, e.g. `w_1stIn` and `l_1stIn`.
pub fn required_columns(kind: StatKind) -> Vec<String> {
    required_fields(kind)
        .iter()
        .flat_map(|field| ["w", "l"].map(|side| format!("{side}_{}", field.column())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_percentages_request_their_columns() {
        assert_eq!(
            required_fields(StatKind::SecondServeWon),
            &[
                ServeField::ServePoints,
                ServeField::FirstIn,
                ServeField::SecondWon
            ]
        );
        assert_eq!(
            required_columns(StatKind::FirstServe),
            vec!["w_svpt", "l_svpt", "w_1stIn", "l_1stIn"]
        );
    }

    #[test]
    fn score_and_time_statistics_request_nothing() {
        assert!(required_fields(StatKind::TotalGames).is_empty());
        assert!(required_fields(StatKind::AvgMinutes).is_empty());
        assert!(required_fields(StatKind::Unrecognized).is_empty());
    }
}
