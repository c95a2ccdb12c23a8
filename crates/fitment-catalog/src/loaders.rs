//! CSV and JSON loaders for the catalog roles.

use std::path::Path;

use fitment_map::MappingDocument;
use fitment_model::{PartTerminology, PcdbPosition, Position, PositionAxis, VcdbVehicle};

use crate::error::{CatalogError, Result};

const POSITION_COLUMNS: [(PositionAxis, &str); 4] = [
    (PositionAxis::FrontRear, "FrontRear"),
    (PositionAxis::LeftRight, "LeftRight"),
    (PositionAxis::UpperLower, "UpperLower"),
    (PositionAxis::InnerOuter, "InnerOuter"),
];

/// A parsed CSV row with header-based field access.
struct Row<'a> {
    path: &'a Path,
    headers: &'a csv::StringRecord,
    record: csv::StringRecord,
}

impl Row<'_> {
    fn get(&self, name: &str) -> Option<String> {
        self.headers
            .iter()
            .position(|h| h.trim() == name)
            .and_then(|i| self.record.get(i))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }

    fn error(&self, message: impl Into<String>) -> CatalogError {
        let line = self
            .record
            .position()
            .map(|p| format!("line {}: ", p.line()))
            .unwrap_or_default();
        CatalogError::Csv {
            path: self.path.to_path_buf(),
            message: format!("{line}{}", message.into()),
        }
    }

    fn required(&self, name: &str) -> Result<String> {
        self.get(name)
            .ok_or_else(|| self.error(format!("missing {name}")))
    }

    fn number<T: std::str::FromStr>(&self, name: &str) -> Result<Option<T>> {
        self.get(name)
            .map(|value| {
                value
                    .parse::<T>()
                    .map_err(|_| self.error(format!("invalid {name} '{value}'")))
            })
            .transpose()
    }

    fn required_number<T: std::str::FromStr>(&self, name: &str) -> Result<T> {
        self.number(name)?
            .ok_or_else(|| self.error(format!("missing {name}")))
    }
}

fn read_rows<T>(path: &Path, mut parse: impl FnMut(&Row<'_>) -> Result<T>) -> Result<Vec<T>> {
    let bytes = std::fs::read(path).map_err(|e| CatalogError::io(path, e))?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(bytes.as_slice());
    let headers = reader
        .headers()
        .map_err(|e| CatalogError::Csv {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .clone();

    let mut results = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| CatalogError::Csv {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let row = Row {
            path,
            headers: &headers,
            record,
        };
        results.push(parse(&row)?);
    }
    Ok(results)
}

/// Loads `VehicleID,BaseVehicleID,SubmodelID,RegionID,Year,Make,Model,Submodel`.
pub fn parse_vehicles_csv(path: &Path) -> Result<Vec<VcdbVehicle>> {
    let mut vehicles = read_rows(path, |row| {
        Ok(VcdbVehicle {
            id: row.required_number("VehicleID")?,
            base_vehicle_id: row.required_number("BaseVehicleID")?,
            submodel_id: row.number("SubmodelID")?,
            region_id: row.number("RegionID")?,
            year: row.required_number("Year")?,
            make: row.required("Make")?,
            model: row.required("Model")?,
            submodel: row.get("Submodel"),
        })
    })?;
    vehicles.sort_by_key(|vehicle| vehicle.id);
    Ok(vehicles)
}

/// Loads `PositionID,Position,FrontRear,LeftRight,UpperLower,InnerOuter`.
///
/// Blank and `N/A` axis cells leave the axis unset.
pub fn parse_positions_csv(path: &Path) -> Result<Vec<PcdbPosition>> {
    let mut positions = read_rows(path, |row| {
        let mut position =
            PcdbPosition::new(row.required_number("PositionID")?, row.required("Position")?);
        for (axis, column) in POSITION_COLUMNS {
            let Some(cell) = row.get(column) else {
                continue;
            };
            let value: Position = cell.parse().map_err(|e: String| row.error(e))?;
            if value.is_applicable() {
                position = position.with(axis, value);
            }
        }
        Ok(position)
    })?;
    positions.sort_by_key(|position| position.id);
    Ok(positions)
}

/// Loads `PartTerminologyID,PartTerminologyName,CategoryID,SubCategoryID,ValidPositions`
/// where `ValidPositions` is a `;`-separated list of position ids.
pub fn parse_terminologies_csv(path: &Path) -> Result<Vec<PartTerminology>> {
    let mut terminologies = read_rows(path, |row| {
        let valid_positions = row
            .get("ValidPositions")
            .map(|cell| {
                cell.split(';')
                    .map(str::trim)
                    .filter(|id| !id.is_empty())
                    .map(|id| {
                        id.parse::<u32>()
                            .map_err(|_| row.error(format!("invalid position id '{id}'")))
                    })
                    .collect::<Result<Vec<u32>>>()
            })
            .transpose()?
            .unwrap_or_default();
        Ok(PartTerminology {
            id: row.required_number("PartTerminologyID")?,
            name: row.required("PartTerminologyName")?,
            category_id: row.number("CategoryID")?.unwrap_or_default(),
            subcategory_id: row.number("SubCategoryID")?.unwrap_or_default(),
            valid_positions,
        })
    })?;
    terminologies.sort_by_key(|terminology| terminology.id);
    Ok(terminologies)
}

/// Loads a `{pattern: ["Make|VehicleCode|Model", ...]}` document.
pub fn parse_mapping_json(path: &Path) -> Result<MappingDocument> {
    let contents = std::fs::read_to_string(path).map_err(|e| CatalogError::io(path, e))?;
    serde_json::from_str(&contents).map_err(|e| CatalogError::Json {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn loads_vehicles() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "vehicles.csv",
            "VehicleID,BaseVehicleID,SubmodelID,RegionID,Year,Make,Model,Submodel\n\
             2,20,,1,2009,Honda,Accord,\n\
             1,10,5,1,2008,Honda,Accord,EX\n",
        );
        let vehicles = parse_vehicles_csv(&path).unwrap();
        assert_eq!(vehicles.len(), 2);
        assert_eq!(vehicles[0].id, 1);
        assert_eq!(vehicles[0].submodel.as_deref(), Some("EX"));
        assert_eq!(vehicles[1].submodel_id, None);
        assert_eq!(vehicles[1].submodel, None);
    }

    #[test]
    fn rejects_bad_year() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "vehicles.csv",
            "VehicleID,BaseVehicleID,SubmodelID,RegionID,Year,Make,Model,Submodel\n\
             1,10,,,20X8,Honda,Accord,\n",
        );
        let err = parse_vehicles_csv(&path).unwrap_err();
        assert!(err.to_string().contains("invalid Year"));
    }

    #[test]
    fn loads_positions_with_blank_axes() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "positions.csv",
            "PositionID,Position,FrontRear,LeftRight,UpperLower,InnerOuter\n\
             1,Front Left,Front,Left,,\n\
             3,Upper,N/A,,Upper,\n",
        );
        let positions = parse_positions_csv(&path).unwrap();
        assert_eq!(positions[0].get(PositionAxis::FrontRear), Some(Position::Front));
        assert_eq!(positions[0].get(PositionAxis::UpperLower), None);
        assert_eq!(positions[1].get(PositionAxis::FrontRear), None);
        assert_eq!(positions[1].get(PositionAxis::UpperLower), Some(Position::Upper));
    }

    #[test]
    fn loads_terminologies() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "terminologies.csv",
            "PartTerminologyID,PartTerminologyName,CategoryID,SubCategoryID,ValidPositions\n\
             1684,Brake Pad,1,2,1; 2\n\
             1896,Wiper Blade,3,4,\n",
        );
        let terminologies = parse_terminologies_csv(&path).unwrap();
        assert_eq!(terminologies[0].valid_positions, vec![1, 2]);
        assert!(terminologies[1].valid_positions.is_empty());
    }
}
