use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

const SEED: &str = r#"[
    {
        "fullName": "Jimi Hendrix",
        "genres": "Rock, Blues",
        "instruments": "Guitar, Vocals",
        "born": -855100800,
        "yearsActive": "1962-1970",
        "imageURL": "jimi"
    },
    {
        "fullName": "Janis Joplin",
        "genres": "Rock",
        "instruments": "Vocals",
        "yearsActive": "1962-1970",
        "imageURL": "janis"
    }
]"#;

fn roster(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("roster").unwrap();
    cmd.env("ROSTER_HOME", home).env("RUST_LOG", "off");
    cmd
}

fn seed_musicians(home: &Path) {
    let seed_file = home.join("musicians.json");
    std::fs::write(&seed_file, SEED).unwrap();
    roster(home)
        .args(["musicians", "seed"])
        .arg(&seed_file)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Imported 2 musicians (0 skipped, 2 images available)",
        ));
}

#[test]
fn test_add_and_list_in_alphabetical_order() {
    let temp_dir = tempfile::tempdir().unwrap();

    roster(temp_dir.path())
        .args(["musicians", "add"])
        .args(["--set", "name=Miles Davis", "--set", "genres=Jazz"])
        .args(["--set", "instruments=Trumpet"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added #1: Miles Davis | Jazz | Trumpet"));

    roster(temp_dir.path())
        .args(["musicians", "add"])
        .args(["--set", "name=John Coltrane", "--set", "genres=Jazz"])
        .args(["--set", "instruments=Saxophone"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added #1: John Coltrane"));

    roster(temp_dir.path())
        .args(["musicians", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("  1. John Coltrane"))
        .stdout(predicate::str::contains("  2. Miles Davis"));

    // The people collection is independent.
    roster(temp_dir.path())
        .args(["people", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No people found"));
}

#[test]
fn test_rejected_entries_fail_with_a_message() {
    let temp_dir = tempfile::tempdir().unwrap();

    roster(temp_dir.path())
        .args(["musicians", "add", "--set", "name=Nina Simone", "--set", "genres=Soul"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Instruments is required"));

    roster(temp_dir.path())
        .args(["musicians", "add"])
        .args(["--set", "name=Nina Simone", "--set", "genres=Soul"])
        .args(["--set", "instruments=Piano", "--set", "start_year=1954"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Retirement year"));

    roster(temp_dir.path())
        .args(["people", "add", "--set", "name=Ada", "--set", "occupation=Mathematician"])
        .args(["--set", "nationality=British", "--set", "birth_date=1815-13-40"])
        .assert()
        .failure();

    roster(temp_dir.path())
        .args(["people", "add", "--set", "colour=blue"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("colour"));
}

#[test]
fn test_duplicates_are_refused() {
    let temp_dir = tempfile::tempdir().unwrap();
    let add = |home: &Path| {
        let mut cmd = roster(home);
        cmd.args(["people", "add"])
            .args(["--set", "name=Marie Curie", "--set", "occupation=Physicist"])
            .args(["--set", "nationality=Polish", "--set", "birth_date=1867-11-07"]);
        cmd
    };

    add(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("born 1867-11-07"));
    add(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "This person already exists in the database",
        ));
}

#[test]
fn test_seed_runs_once_and_fills_the_picker() {
    let temp_dir = tempfile::tempdir().unwrap();
    seed_musicians(temp_dir.path());

    roster(temp_dir.path())
        .args(["musicians", "seed"])
        .arg(temp_dir.path().join("musicians.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("musicians were already seeded"));

    roster(temp_dir.path())
        .args(["musicians", "images"])
        .assert()
        .success()
        .stdout(predicate::eq("jimi\njanis\n"));
}

#[test]
fn test_sort_is_remembered_and_search_filters() {
    let temp_dir = tempfile::tempdir().unwrap();
    seed_musicians(temp_dir.path());

    roster(temp_dir.path())
        .args(["musicians", "sort", "oldest"])
        .assert()
        .success();

    // Janis has no birth date, so she sorts after Jimi.
    roster(temp_dir.path())
        .args(["musicians", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("  1. Jimi Hendrix"))
        .stdout(predicate::str::contains("  2. Janis Joplin"));

    roster(temp_dir.path())
        .args(["musicians", "list", "--search", "Janis"])
        .assert()
        .success()
        .stdout(predicate::str::contains("  2. Janis Joplin"))
        .stdout(predicate::str::contains("Jimi").not());

    roster(temp_dir.path())
        .args(["musicians", "list", "--search", "janis"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No musicians found"));

    roster(temp_dir.path())
        .args(["musicians", "sort", "sideways"])
        .assert()
        .failure();
}

#[test]
fn test_edit_and_delete_by_position() {
    let temp_dir = tempfile::tempdir().unwrap();
    seed_musicians(temp_dir.path());

    roster(temp_dir.path())
        .args(["musicians", "edit", "2", "--set", "end_year=1971"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Updated #2: Jimi Hendrix | Rock, Blues | Guitar, Vocals | active 1962-1971",
        ));

    roster(temp_dir.path())
        .args(["musicians", "edit", "1", "--image", "nobody"])
        .assert()
        .failure();

    roster(temp_dir.path())
        .args(["musicians", "delete", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("There is no musician at position 5"));

    roster(temp_dir.path())
        .args(["musicians", "delete", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted Janis Joplin"));

    roster(temp_dir.path())
        .args(["musicians", "delete-all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted 1 musicians"));
}

fn sign_up(home: &Path, username: &str, email: &str) -> assert_cmd::assert::Assert {
    roster(home)
        .args(["users", "signup", "--name", "Ada Lovelace", "--username", username])
        .args(["--email", email, "--confirm-email", email])
        .args(["--password", "engine", "--confirm-password", "engine"])
        .assert()
}

#[test]
fn test_sign_up_sign_in_and_out() {
    let temp_dir = tempfile::tempdir().unwrap();

    sign_up(temp_dir.path(), "ada", "ada@example.org")
        .success()
        .stdout(predicate::str::contains(
            "Registered ada (Ada Lovelace) <ada@example.org>",
        ));

    roster(temp_dir.path())
        .args(["users", "whoami"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nobody is signed in"));

    roster(temp_dir.path())
        .args(["users", "signin", "--username", "ada", "--password", "wrong"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Authentication failed"));

    roster(temp_dir.path())
        .args(["users", "signin", "--username", "ada", "--password", "engine"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Signed in as ada"));

    roster(temp_dir.path())
        .args(["users", "whoami"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ada (Ada Lovelace) <ada@example.org>"));

    roster(temp_dir.path())
        .args(["users", "signout"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Signed out"));
}

#[test]
fn test_sign_up_rules() {
    let temp_dir = tempfile::tempdir().unwrap();

    roster(temp_dir.path())
        .args(["users", "signup", "--name", "Ada Lovelace"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Username is required"));

    sign_up(temp_dir.path(), "ada", "ada@example")
        .failure()
        .stderr(predicate::str::contains("is not a valid email address"));

    sign_up(temp_dir.path(), "ada", "ada@example.org").success();
    sign_up(temp_dir.path(), "countess", "ada@example.org")
        .failure()
        .stderr(predicate::str::contains("ada@example.org is already registered"));
}

#[test]
fn test_open_ended_careers_survive_seeding() {
    let temp_dir = tempfile::tempdir().unwrap();
    let seed_file = temp_dir.path().join("dylan.json");
    std::fs::write(
        &seed_file,
        r#"[{"fullName": "Bob Dylan", "genres": "Folk", "instruments": "Guitar",
             "yearsActive": "1959-present"}]"#,
    )
    .unwrap();

    roster(temp_dir.path())
        .args(["musicians", "seed"])
        .arg(&seed_file)
        .assert()
        .success();

    roster(temp_dir.path())
        .args(["musicians", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Bob Dylan | Folk | Guitar | active 1959-"));
}
