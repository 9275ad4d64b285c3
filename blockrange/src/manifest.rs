//! Pin manifest records.
//!
//! A manifest lists the index chunks published for a block span. Each
//! chunk file is named after its [`ManifestRange`], e.g.
//! `000000000-000000001`, which is a simpler sibling of [`crate::BlockRange`]:
//! two plain block numbers, no keywords, no modifier.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Width of each block number in a chunk file name.
pub const RANGE_WIDTH: usize = 9;

pub type IpfsHash = String;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ManifestRangeError {
    #[error("'{0}' is not of the form first-last")]
    Malformed(String),

    #[error("first block {first} is after last block {last}")]
    Reversed { first: u64, last: u64 },
}

/// Inclusive span of blocks covered by one chunk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ManifestRange {
    pub first: u64,
    pub last: u64,
}

impl ManifestRange {
    pub fn new(first: u64, last: u64) -> Result<Self, ManifestRangeError> {
        if first > last {
            return Err(ManifestRangeError::Reversed { first, last });
        }
        Ok(Self { first, last })
    }

    pub fn contains(&self, block: u64) -> bool {
        self.first <= block && block <= self.last
    }

    /// Parse the range out of a chunk file name such as
    /// `000000000-000000001.bloom`; any directory and extension are ignored.
    pub fn from_file_name(name: &str) -> Result<Self, ManifestRangeError> {
        let base = name.rsplit('/').next().unwrap_or(name);
        let stem = base.split('.').next().unwrap_or(base);
        stem.parse()
    }
}

impl FromStr for ManifestRange {
    type Err = ManifestRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ManifestRangeError::Malformed(s.to_string());
        let (first, last) = s.split_once('-').ok_or_else(malformed)?;
        let number = |part: &str| -> Result<u64, ManifestRangeError> {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(malformed());
            }
            part.parse().map_err(|_| malformed())
        };
        Self::new(number(first)?, number(last)?)
    }
}

impl fmt::Display for ManifestRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:0width$}-{:0width$}",
            self.first,
            self.last,
            width = RANGE_WIDTH
        )
    }
}

impl Serialize for ManifestRange {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ManifestRange {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// One published chunk: its file name and the content hashes of its parts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PinDescriptor {
    pub file_name: String,
    pub bloom_hash: IpfsHash,
    pub index_hash: IpfsHash,
}

impl PinDescriptor {
    /// Block span encoded in the file name.
    pub fn range(&self) -> Result<ManifestRange, ManifestRangeError> {
        ManifestRange::from_file_name(&self.file_name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PinsList(pub Vec<PinDescriptor>);

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(rename = "fileName")]
    pub file_name: String,
    #[serde(rename = "indexFormat")]
    pub index_format: IpfsHash,
    #[serde(rename = "bloomFormat")]
    pub bloom_format: IpfsHash,
    #[serde(rename = "commitHash")]
    pub commit_hash: String,
    #[serde(rename = "prevHash")]
    pub previous_hash: IpfsHash,
    #[serde(rename = "newBlockRange")]
    pub new_block_range: ManifestRange,
    #[serde(rename = "prevBlockRange")]
    pub previous_block_range: ManifestRange,
    #[serde(rename = "newPins", default)]
    pub new_pins: PinsList,
    #[serde(rename = "prevPins", default)]
    pub previous_pins: PinsList,
}

impl Manifest {
    pub fn from_json(contents: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(contents)?)
    }
}

/// Tabular output: a header row plus one row per record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvFormatted {
    pub header: Vec<String>,
    pub content: Vec<Vec<String>>,
}

impl CsvFormatted {
    /// Render with the given delimiter (`b','` for CSV, `b'\t'` for TSV).
    pub fn to_delimited(&self, delimiter: u8) -> crate::Result<String> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(Vec::new());
        writer.write_record(&self.header)?;
        for row in &self.content {
            writer.write_record(row)?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| csv::Error::from(e.into_error()))?;
        String::from_utf8(bytes).map_err(|e| crate::Error::Output(e.to_string()))
    }
}

impl PinsList {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PinDescriptor> {
        self.0.iter()
    }

    /// Rows for CSV and TSV output.
    pub fn csv_output(&self) -> CsvFormatted {
        CsvFormatted {
            header: vec![
                "fileName".to_string(),
                "bloomHash".to_string(),
                "indexHash".to_string(),
            ],
            content: self
                .iter()
                .map(|pin| {
                    vec![
                        pin.file_name.clone(),
                        pin.bloom_hash.clone(),
                        pin.index_hash.clone(),
                    ]
                })
                .collect(),
        }
    }

    /// JSON output is the list itself.
    pub fn json_output(&self) -> crate::Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

impl From<Vec<PinDescriptor>> for PinsList {
    fn from(pins: Vec<PinDescriptor>) -> Self {
        Self(pins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pin(name: &str) -> PinDescriptor {
        PinDescriptor {
            file_name: name.to_string(),
            bloom_hash: format!("Qm{}bloom", name.len()),
            index_hash: format!("Qm{}index", name.len()),
        }
    }

    #[test]
    fn test_manifest_range_parse() {
        let r: ManifestRange = "000000000-010567003".parse().unwrap();
        assert_eq!(r, ManifestRange { first: 0, last: 10567003 });
        assert_eq!(r.to_string(), "000000000-010567003");
    }

    #[test]
    fn test_manifest_range_reversed() {
        let err = "000000010-000000001".parse::<ManifestRange>().unwrap_err();
        assert_eq!(err, ManifestRangeError::Reversed { first: 10, last: 1 });
    }

    #[test]
    fn test_manifest_range_malformed() {
        for bad in ["", "12", "a-1", "1-", "-1", "1-2-3"] {
            assert!(
                matches!(bad.parse::<ManifestRange>(), Err(ManifestRangeError::Malformed(_))),
                "expected malformed: {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_manifest_range_from_file_name() {
        let r = ManifestRange::from_file_name("blooms/000000000-000000001.bloom").unwrap();
        assert_eq!(r, ManifestRange { first: 0, last: 1 });
        assert!(r.contains(1));
        assert!(!r.contains(2));
    }

    #[test]
    fn test_pins_csv_output() {
        let pins = PinsList::from(vec![pin("000000000-000000001"), pin("a,b")]);
        let csv = pins.csv_output();
        assert_eq!(csv.header, vec!["fileName", "bloomHash", "indexHash"]);
        assert_eq!(csv.content.len(), 2);

        let text = csv.to_delimited(b',').unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "fileName,bloomHash,indexHash");
        assert_eq!(lines[1], "000000000-000000001,Qm19bloom,Qm19index");
        assert_eq!(lines[2], "\"a,b\",Qm3bloom,Qm3index");

        let tsv = csv.to_delimited(b'\t').unwrap();
        assert!(tsv.starts_with("fileName\tbloomHash\tindexHash\n"));
        assert!(tsv.contains("a,b\tQm3bloom"));
    }

    #[test]
    fn test_csv_quotes_line_breaks() {
        let pins = PinsList::from(vec![
            PinDescriptor {
                file_name: "a\rb".to_string(),
                bloom_hash: "x".to_string(),
                index_hash: "y".to_string(),
            },
            PinDescriptor {
                file_name: "say \"hi\"".to_string(),
                bloom_hash: "x\ny".to_string(),
                index_hash: "z".to_string(),
            },
        ]);
        let text = pins.csv_output().to_delimited(b',').unwrap();
        assert_eq!(
            text,
            "fileName,bloomHash,indexHash\n\"a\rb\",x,y\n\"say \"\"hi\"\"\",\"x\ny\",z\n"
        );
    }

    #[test]
    fn test_pins_json_output() {
        let pins = PinsList::from(vec![pin("000000000-000000001")]);
        let value = pins.json_output().unwrap();
        assert_eq!(value[0]["fileName"], "000000000-000000001");
        assert_eq!(value[0]["bloomHash"], "Qm19bloom");
    }

    #[test]
    fn test_manifest_from_json() {
        let json = r#"{
            "fileName": "manifest.json",
            "indexFormat": "QmIndex",
            "bloomFormat": "QmBloom",
            "commitHash": "abc123",
            "prevHash": "QmPrev",
            "newBlockRange": "000000002-000000010",
            "prevBlockRange": "000000000-000000001",
            "newPins": [
                {"fileName": "000000002-000000010", "bloomHash": "QmB", "indexHash": "QmI"}
            ],
            "prevPins": []
        }"#;
        let m = Manifest::from_json(json).unwrap();
        assert_eq!(m.new_block_range, ManifestRange { first: 2, last: 10 });
        assert_eq!(m.new_pins.len(), 1);
        assert!(m.previous_pins.is_empty());
        assert_eq!(m.new_pins.0[0].range().unwrap(), m.new_block_range);

        let back = serde_json::to_value(&m).unwrap();
        assert_eq!(back["prevBlockRange"], "000000000-000000001");
    }

    #[test]
    fn test_manifest_bad_range_rejected() {
        let json = r#"{"fileName":"m","indexFormat":"","bloomFormat":"","commitHash":"",
            "prevHash":"","newBlockRange":"9-1","prevBlockRange":"0-0"}"#;
        assert!(Manifest::from_json(json).is_err());
    }
}
