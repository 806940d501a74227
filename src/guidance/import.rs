use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer};

use super::catalog::GuidanceCatalog;
use super::domain::{GraduateId, GraduateRecord, UserProfile};

/// Failure while loading or saving guidance data files.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("unable to open {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed graduate csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parses a graduate snapshot. Headers and fields are trimmed and blank
/// cells read as absent values.
pub fn parse_graduates<R: Read>(reader: R) -> Result<Vec<GraduateRecord>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for row in csv_reader.deserialize::<GraduateRow>() {
        records.push(row?.into_record());
    }

    Ok(records)
}

pub fn load_graduates(path: &Path) -> Result<Vec<GraduateRecord>, ImportError> {
    Ok(parse_graduates(open(path)?)?)
}

pub fn parse_profiles<R: Read>(reader: R) -> Result<Vec<UserProfile>, serde_json::Error> {
    serde_json::from_reader(reader)
}

pub fn load_profiles(path: &Path) -> Result<Vec<UserProfile>, ImportError> {
    Ok(parse_profiles(open(path)?)?)
}

pub fn save_profiles(path: &Path, profiles: &[UserProfile]) -> Result<(), ImportError> {
    let file = File::create(path).map_err(|source| ImportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, profiles)?;
    writer.flush().map_err(|source| ImportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_catalog(path: &Path) -> Result<GuidanceCatalog, ImportError> {
    Ok(GuidanceCatalog::from_json(open(path)?)?)
}

fn open(path: &Path) -> Result<BufReader<File>, ImportError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| ImportError::Io {
            path: path.to_path_buf(),
            source,
        })
}

#[derive(Debug, Deserialize)]
struct GraduateRow {
    id: u64,
    name: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    major: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    graduation_year: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    career_path: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    workplace: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    position: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    location: Option<String>,
    #[serde(default)]
    gpa: Option<f64>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    awards: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    skills: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    experience: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    experience_type: Option<String>,
}

impl GraduateRow {
    fn into_record(self) -> GraduateRecord {
        GraduateRecord {
            id: GraduateId(self.id),
            name: self.name,
            major: self.major,
            graduation_year: self.graduation_year,
            career_path: self.career_path,
            workplace: self.workplace,
            position: self.position,
            location: self.location,
            gpa: self.gpa,
            awards: self.awards,
            skills: self.skills,
            experience: self.experience,
            experience_type: self.experience_type,
        }
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "\
id, name, major, graduation_year, career_path, workplace, position, location, gpa, awards, skills, experience, experience_type
1,Li Wei,CS,2022,考研,Tsinghua University, ,Beijing,3.6,National scholarship,\"rust, sql\",Lab assistant,research
2,Zhao Min,EE,2023,就业,Huawei,Engineer,Shenzhen,,,,,
";

    #[test]
    fn parses_rows_with_blank_cells_as_absent() {
        let records = parse_graduates(CSV.as_bytes()).expect("csv parses");
        assert_eq!(records.len(), 2);

        let first = &records[0];
        assert_eq!(first.id, GraduateId(1));
        assert_eq!(first.career_path.as_deref(), Some("考研"));
        assert_eq!(first.position, None);
        assert_eq!(first.gpa, Some(3.6));
        assert_eq!(first.skills.as_deref(), Some("rust, sql"));

        let second = &records[1];
        assert_eq!(second.workplace.as_deref(), Some("Huawei"));
        assert_eq!(second.gpa, None);
        assert_eq!(second.skills, None);
        assert_eq!(second.experience_type, None);
    }

    #[test]
    fn rejects_non_numeric_gpa() {
        let csv = "id,name,gpa\n1,Li Wei,excellent\n";
        assert!(parse_graduates(csv.as_bytes()).is_err());
    }

    #[test]
    fn parses_profiles_with_optional_fields() {
        let json = r#"[
            { "username": "alice", "major": "CS", "gpa": 3.4 },
            { "username": "bob", "personality_type": "INTJ" }
        ]"#;
        let profiles = parse_profiles(json.as_bytes()).expect("profiles parse");
        assert_eq!(profiles.len(), 2);
        assert_eq!(profiles[0].major.as_deref(), Some("CS"));
        assert_eq!(profiles[0].career_interest_categories, None);
        assert_eq!(profiles[1].gpa, None);
        assert_eq!(profiles[1].personality_type.as_deref(), Some("INTJ"));
    }
}
