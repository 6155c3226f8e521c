//! Unit tests for ESPN wire types and record containers

use super::*;
use serde_json::json;

fn team(name: &str, division: &str, wins: u32) -> TeamRecord {
    TeamRecord {
        team_id: None,
        conference: division.split(' ').next().unwrap_or_default().to_string(),
        division: division.to_string(),
        name: name.to_string(),
        abbreviation: name[..3].to_uppercase(),
        wins,
        losses: 17 - wins,
        ties: 0,
        win_percent: wins as f64 / 17.0,
        points_for: None,
        points_against: None,
        point_differential: None,
        home_record: None,
        away_record: None,
        venue: None,
        address: None,
        logo: None,
    }
}

#[cfg(test)]
mod types_tests {
    use super::*;

    #[test]
    fn test_standings_document_deserialization() {
        let doc = json!({
            "standings": [
                {
                    "team": { "$ref": "http://api.test/teams/2" },
                    "records": [
                        {
                            "summary": "11-6",
                            "stats": [
                                { "name": "wins", "value": 11.0 },
                                { "name": "winPercent", "value": 0.647 }
                            ]
                        },
                        { "summary": "7-2" },
                        { "summary": "4-4" }
                    ]
                }
            ]
        });

        let parsed: StandingsDocument = serde_json::from_value(doc).unwrap();
        assert_eq!(parsed.standings.len(), 1);
        let entry: StandingEntry = decode_entry(&parsed.standings[0], "doc").unwrap();
        assert_eq!(entry.team.href, "http://api.test/teams/2");
        assert_eq!(entry.records.len(), 3);
        assert_eq!(entry.records[1].summary.as_deref(), Some("7-2"));
        assert!(entry.records[2].stats.is_empty());
        assert_eq!(stat_value(&entry.records[0].stats, "wins"), Some(11.0));
        assert_eq!(stat_value(&entry.records[0].stats, "ties"), None);
    }

    #[test]
    fn test_stat_without_value_counts_as_missing() {
        let stats: Vec<Stat> =
            serde_json::from_value(json!([{ "name": "wins" }, { "name": "losses", "value": 3.0 }]))
                .unwrap();
        assert_eq!(stat_value(&stats, "wins"), None);
        assert_eq!(stat_value(&stats, "losses"), Some(3.0));
    }

    #[test]
    fn test_athlete_document_optional_fields() {
        let doc = json!({
            "id": "3139477",
            "displayName": "Patrick Mahomes",
            "position": { "abbreviation": "QB" },
            "team": { "$ref": "http://api.test/teams/12" },
            "dateOfBirth": "1995-09-17T07:00Z",
            "debutYear": 2017,
            "draft": { "displayText": "Round 1, Pick 10" }
        });

        let athlete: AthleteDocument = serde_json::from_value(doc).unwrap();
        assert_eq!(athlete.id.as_deref(), Some("3139477"));
        assert!(athlete.college.is_none());
        assert!(athlete.headshot.is_none());
        assert_eq!(athlete.debut_year, Some(2017));
        assert_eq!(
            athlete.draft.and_then(|d| d.display_text).as_deref(),
            Some("Round 1, Pick 10")
        );
    }

    #[test]
    fn test_leaders_document_deserialization() {
        let doc = json!({
            "categories": [
                {
                    "name": "sacks",
                    "displayName": "Sacks",
                    "leaders": [
                        {
                            "value": 17.5,
                            "displayValue": "17.5",
                            "athlete": { "$ref": "http://api.test/athletes/1" },
                            "team": { "$ref": "http://api.test/teams/1" }
                        },
                        {
                            "value": 15.0,
                            "athlete": { "$ref": "http://api.test/athletes/2" }
                        }
                    ]
                }
            ]
        });

        let parsed: LeadersDocument = serde_json::from_value(doc).unwrap();
        let category = &parsed.categories[0];
        assert_eq!(category.name, "sacks");
        assert_eq!(category.leaders.len(), 2);
        let first: Leader = decode_entry(&category.leaders[0], "doc").unwrap();
        let second: Leader = decode_entry(&category.leaders[1], "doc").unwrap();
        assert_eq!(first.value, 17.5);
        assert!(second.team.is_none());
    }

    #[test]
    fn test_malformed_entry_does_not_fail_document() {
        let doc = json!({
            "standings": [
                { "team": { "$ref": "http://api.test/teams/2" }, "records": [] },
                { "records": [] }
            ]
        });

        let parsed: StandingsDocument = serde_json::from_value(doc).unwrap();
        assert_eq!(parsed.standings.len(), 2);
        assert!(decode_entry::<StandingEntry>(&parsed.standings[0], "doc").is_ok());
        match decode_entry::<StandingEntry>(&parsed.standings[1], "http://api.test/standings") {
            Err(StatsError::Parse { url, .. }) => assert_eq!(url, "http://api.test/standings"),
            other => panic!("Expected Parse, got {:?}", other),
        }
    }

    #[test]
    fn test_non_numeric_stat_value_counts_as_missing() {
        let stats: Vec<Stat> = serde_json::from_value(json!([
            { "name": "wins", "value": "ten" },
            { "name": "losses", "value": null },
            { "name": "ties", "value": 1 }
        ]))
        .unwrap();
        assert_eq!(stat_value(&stats, "wins"), None);
        assert_eq!(stat_value(&stats, "losses"), None);
        assert_eq!(stat_value(&stats, "ties"), Some(1.0));
    }

    #[test]
    fn test_team_document_with_venue() {
        let doc = json!({
            "id": "2",
            "displayName": "Buffalo Bills",
            "abbreviation": "BUF",
            "logos": [{ "href": "http://img.test/buf.png" }],
            "venue": {
                "fullName": "Highmark Stadium",
                "address": { "city": "Orchard Park", "state": "NY", "zipCode": "14127" }
            },
            "groups": { "$ref": "http://api.test/groups/3" }
        });

        let parsed: TeamDocument = serde_json::from_value(doc).unwrap();
        let venue = parsed.venue.unwrap();
        assert_eq!(venue.full_name.as_deref(), Some("Highmark Stadium"));
        assert_eq!(
            venue.address,
            Some(Address {
                city: Some("Orchard Park".to_string()),
                state: Some("NY".to_string()),
                zip_code: Some("14127".to_string()),
            })
        );
        assert_eq!(parsed.groups.unwrap().href, "http://api.test/groups/3");
    }

    #[test]
    fn test_display_order_is_canonical() {
        let mut standings = Standings::default();
        standings
            .divisions
            .insert("NFC West".to_string(), vec![team("Rams", "NFC West", 10)]);
        standings
            .divisions
            .insert("AFC East".to_string(), vec![team("Bills", "AFC East", 13)]);
        standings
            .divisions
            .insert("AFC North".to_string(), vec![team("Ravens", "AFC North", 12)]);

        let order = standings.display_order();
        assert_eq!(order.len(), 2);
        assert_eq!(order[0].conference, "AFC");
        let afc: Vec<&str> = order[0].divisions.iter().map(|(name, _)| *name).collect();
        assert_eq!(afc, vec!["AFC North", "AFC East"]);
        assert_eq!(order[1].conference, "NFC");
        assert_eq!(order[1].divisions[0].0, "NFC West");
    }

    #[test]
    fn test_display_order_omits_absent_and_unknown_divisions() {
        let mut standings = Standings::default();
        standings
            .divisions
            .insert("Central".to_string(), vec![team("Lions", "NFC Central", 9)]);
        standings.divisions.insert("AFC South".to_string(), vec![]);

        assert!(standings.display_order().is_empty());
        assert_eq!(standings.team_count(), 1);
        assert!(!standings.is_empty());
    }

    #[test]
    fn test_empty_standings() {
        let standings = Standings::default();
        assert!(standings.is_empty());
        assert_eq!(standings.team_count(), 0);
        assert!(standings.division("AFC East").is_empty());
    }
}
