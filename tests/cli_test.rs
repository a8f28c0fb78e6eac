#[cfg(feature = "std")]
#[cfg(test)]
mod cli_tests {
    use broadside::player::cli::parse_coord;
    use broadside::player::{parse_command, CliCommand};
    use broadside::Coordinate;

    #[test]
    fn test_parse_coord() {
        assert_eq!(parse_coord("A1", 8), Ok(Coordinate::new(0, 0)));
        assert_eq!(parse_coord("b4", 8), Ok(Coordinate::new(3, 1)));
        assert_eq!(parse_coord("H8", 8), Ok(Coordinate::new(7, 7)));
        assert!(parse_coord("", 8).is_err());
        assert!(parse_coord("A", 8).is_err());
        assert!(parse_coord("A0", 8).is_err());
        assert!(parse_coord("A9", 8).is_err());
        assert!(parse_coord("I1", 8).is_err());
        assert!(parse_coord("1A", 8).is_err());
        assert!(parse_coord("Ax", 8).is_err());
    }

    #[test]
    fn test_parse_coord_matches_display() {
        for row in 0..8 {
            for col in 0..8 {
                let at = Coordinate::new(row, col);
                assert_eq!(parse_coord(&at.to_string(), 8), Ok(at));
            }
        }
    }

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command("C5", 8), Ok(CliCommand::Fire(Coordinate::new(4, 2))));
        assert_eq!(parse_command("  help ", 8), Ok(CliCommand::Help));
        assert_eq!(parse_command("EMP", 8), Ok(CliCommand::Emp));
        assert_eq!(
            parse_command("scan B2", 8),
            Ok(CliCommand::Scan(Coordinate::new(1, 1)))
        );
        assert_eq!(parse_command("volley c", 8), Ok(CliCommand::Volley(2)));
        assert!(parse_command("scan", 8).is_err());
        assert!(parse_command("volley", 8).is_err());
        assert!(parse_command("volley Z", 8).is_err());
        assert!(parse_command("", 8).is_err());
        assert!(parse_command("fire!", 8).is_err());
    }
}
