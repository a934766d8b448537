// tests/reconcile.rs
mod common;

use common::{cells, Canned};
use fftt_scrape::config::RunOptions;
use fftt_scrape::progress::NullProgress;
use fftt_scrape::scrape::teams::{self, TEAM_HEADERS};
use fftt_scrape::store::DataSet;

const CLUB: &str = "08940073";

const TEAMS: &str = r#"<?xml version="1.0" encoding="ISO-8859-1"?>
<liste>
<equipe><libequipe>US FONTENAY TT 1 - Phase 1</libequipe><libdivision>FED_Nationale 2 Poule 3</libdivision>
  <liendivision>cx_poule=101&amp;D1=201&amp;organisme_pere=94</liendivision>
  <libepr>FED_Championnat de France par Equipes Masculin</libepr><phase>1</phase></equipe>
<equipe><libequipe>US FONTENAY TT 2 - Phase 1</libequipe><libdivision>L08_R1 Dames</libdivision>
  <liendivision>cx_poule=102&amp;D1=202</liendivision>
  <libepr>FED_Championnat de France par Equipes Feminin</libepr><phase>1</phase></equipe>
<equipe><libequipe>US FONTENAY TT 3 - Phase 1</libequipe><libdivision>Coupe 94</libdivision>
  <liendivision>cx_poule=103&amp;D1=203</liendivision>
  <libepr>L08_Coupe du Val de Marne</libepr><phase>1</phase></equipe>
<equipe><libequipe>US FONTENAY TT 4 - Phase 1</libequipe><libdivision>D2 Masculine Poule 1</libdivision>
  <liendivision>D1=204</liendivision>
  <libepr>FED_Championnat de France par Equipes Masculin</libepr><phase>1</phase></equipe>
<equipe><libequipe>US FONTENAY TT 5 - Phase 1</libequipe><libdivision>D3 Masculine Poule 2</libdivision>
  <liendivision>cx_poule=105&amp;D1=205</liendivision>
  <libepr>FED_Championnat de France par Equipes Masculin</libepr><phase>1</phase></equipe>
</liste>"#;

const STANDINGS_101: &str = "<liste>\
<classement><equipe>PARIS 13 TT 1</equipe><rang>1</rang><pts>20</pts><J>7</J><V>6</V><N>1</N><D>0</D><F>0</F></classement>\
<classement><equipe>US FONTENAY TT 1 - Phase 1</equipe><rang>3</rang><pts>15</pts><J>7</J><V>4</V><N>0</N><D>3</D><F>0</F></classement>\
</liste>";

const FIXTURES_101: &str = "<liste>\
<tour><libelle>Poule 3 - tour n°10 du 15/03/2026</libelle><equa>PARIS 13 TT 1</equa><equb>US FONTENAY TT 1</equb>\
<scorea>8</scorea><scoreb>6</scoreb><dateprevue>15/03/2026</dateprevue><datereelle/><ncluba>08750001</ncluba><nclubb>08940073</nclubb></tour>\
<tour><libelle>Poule 3 - tour n°2 du 04/10/2025</libelle><equa>US FONTENAY TT 1</equa><equb>VINCENNES 1</equb>\
<scorea>9</scorea><scoreb>5</scoreb><dateprevue>04/10/2025</dateprevue><datereelle>05/10/2025</datereelle><ncluba>08940073</ncluba><nclubb>08940010</nclubb></tour>\
<tour><libelle>Poule 3 - tour n°9 du 01/03/2026</libelle><equa>US FONTENAY TT 1</equa><equb>IVRY 2</equb>\
<scorea/><scoreb/><dateprevue>01/03/2026</dateprevue><datereelle/><ncluba>08940073</ncluba><nclubb>08940022</nclubb></tour>\
<tour><libelle>Poule 3 - tour n°2 du 04/10/2025</libelle><equa>PARIS 13 TT 1</equa><equb>IVRY 2</equb>\
<scorea>7</scorea><scoreb>7</scoreb><dateprevue>04/10/2025</dateprevue><datereelle>04/10/2025</datereelle><ncluba>08750001</ncluba><nclubb>08940022</nclubb></tour>\
<tour><libelle>Barrage</libelle><equa>US FONTENAY TT 1</equa><equb>IVRY 2</equb>\
<scorea/><scoreb/><dateprevue>01/06/2026</dateprevue><datereelle/><ncluba>08940073</ncluba><nclubb>08940022</nclubb></tour>\
</liste>";

const FIXTURES_102: &str = "<liste>\
<tour><libelle>Poule 1 - tour n°1 du 27/09/2025</libelle><equa>CRETEIL 1</equa><equb>US FONTENAY TT 2</equb>\
<scorea>3</scorea><scoreb>7</scoreb><dateprevue>27/09/2025</dateprevue><datereelle>27/09/2025</datereelle><ncluba>08940099</ncluba><nclubb>08940073</nclubb></tour>\
</liste>";

const FIXTURES_105: &str = "<liste>\
<tour><libelle>Poule 2 - tour n°1 du 27/09/2025</libelle><equa>A</equa><equb>B</equb>\
<scorea/><scoreb/><dateprevue>27/09/2025</dateprevue><datereelle/><ncluba>1</ncluba><nclubb>2</nclubb></tour>\
</liste>";

fn api() -> Canned {
    Canned::default()
        .answer("xml_equipe?numclu=08940073", TEAMS)
        .answer("xml_result_equ?action=classement&auto=1&D1=201&cx_poule=101", STANDINGS_101)
        .fail("xml_result_equ?action=classement&auto=1&D1=202&cx_poule=102")
        .answer("xml_result_equ?action=classement&auto=1&D1=205&cx_poule=105", "<liste>\n</liste>")
        .answer("xml_rencontre_equ?poule=101", FIXTURES_101)
        .answer("xml_rencontre_equ?poule=102", FIXTURES_102)
        .answer("xml_rencontre_equ?poule=105", FIXTURES_105)
}

fn rows() -> DataSet {
    let reports = teams::collect_teams(&api(), &RunOptions::for_club(CLUB), None).unwrap();
    teams::to_rows(&reports)
}

#[test]
fn headers_are_stable() {
    assert_eq!(rows().headers, TEAM_HEADERS.to_vec());
}

#[test]
fn one_row_per_club_fixture_in_round_order() {
    let data = rows();
    let first_team: Vec<_> = data.rows.iter().filter(|r| r[0] == "1G").cloned().collect();
    assert_eq!(cells(&first_team, 11), vec!["2", "9", "10"]);
    assert_eq!(cells(&first_team, 12), vec!["05/10/2025", "01/03/2026", "15/03/2026"]);
    assert_eq!(cells(&first_team, 17), vec!["True", "True", "False"]);
    assert_eq!(first_team[0][2], "N2");
    assert_eq!(first_team[0][4..11], ["3", "15", "7", "4", "0", "3", "0"]);
}

#[test]
fn failed_standings_fall_back_to_defaults() {
    let data = rows();
    let second: Vec<_> = data.rows.iter().filter(|r| r[0] == "2F").collect();
    assert_eq!(second.len(), 1);
    assert_eq!(second[0][2], "R1");
    assert_eq!(second[0][4..11], ["N/A", "N/A", "0", "0", "0", "0", "0"]);
}

#[test]
fn filtered_unpooled_and_fixtureless_teams_emit_nothing() {
    let canned = api();
    let reports = teams::collect_teams(&canned, &RunOptions::for_club(CLUB), None).unwrap();
    let names: Vec<_> = reports.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["US FONTENAY TT 1 - Phase 1", "US FONTENAY TT 2 - Phase 1", "US FONTENAY TT 5 - Phase 1"]);
    assert!(reports[2].fixtures.is_empty());
    assert!(!canned.called("xml_rencontre_equ?poule=103"));

    let data = teams::to_rows(&reports);
    assert_eq!(data.len(), 4);
    assert!(data.rows.iter().all(|r| r[0] != "5G" && r[0] != "3G"));
}

#[test]
fn run_writes_club_file() {
    let dir = tempfile::tempdir().unwrap();
    let opts = RunOptions::for_club(CLUB).with_out_dir(dir.path());
    let path = teams::run(&api(), &opts, Some(&mut NullProgress)).unwrap();
    assert_eq!(path, dir.path().join("teams_08940073.csv"));

    let back = DataSet::load(&path).unwrap();
    assert_eq!(back, rows());
}

#[test]
fn fixture_transport_error_aborts_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let opts = RunOptions::for_club(CLUB).with_out_dir(dir.path());
    let broken = api().fail("xml_rencontre_equ?poule=102");
    assert!(teams::run(&broken, &opts, None).is_err());
    assert!(!opts.club_file("teams").exists());
}
