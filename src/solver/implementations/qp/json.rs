use crate::{algebra::*, solver::qp::DefaultSettings};

use serde::{de::DeserializeOwned, Serialize};
use std::io::Write;
use std::{fs::File, io, io::Read};

impl<T> DefaultSettings<T>
where
    T: FloatT + DeserializeOwned + Serialize,
{
    /// Write the settings to `file` as JSON.
    pub fn write_to_file(&self, file: &mut File) -> Result<(), io::Error> {
        // infinities can't be represented in json
        let mut settings = self.clone();
        sanitize_settings(&mut settings);

        let json = serde_json::to_string(&settings)?;
        file.write_all(json.as_bytes())?;

        Ok(())
    }

    /// Read settings from a JSON file.  Fields absent from the file
    /// take their default values.  The result is validated.
    pub fn read_from_file(file: &mut File) -> Result<Self, io::Error> {
        let mut buffer = String::new();
        file.read_to_string(&mut buffer)?;
        let mut settings: DefaultSettings<T> = serde_json::from_str(&buffer)?;

        desanitize_settings(&mut settings);

        settings
            .validate()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        Ok(settings)
    }
}

fn sanitize_settings<T: FloatT>(settings: &mut DefaultSettings<T>) {
    if settings.time_limit == f64::INFINITY {
        settings.time_limit = f64::MAX;
    }
}

fn desanitize_settings<T: FloatT>(settings: &mut DefaultSettings<T>) {
    if settings.time_limit == f64::MAX {
        settings.time_limit = f64::INFINITY;
    }
}

#[test]
fn test_json_io() {
    use crate::solver::qp::DefaultSettingsBuilder;
    use std::io::{Seek, SeekFrom};

    let settings = DefaultSettingsBuilder::<f64>::default()
        .max_iter(42)
        .barrier_mu(20.)
        .verbose(true)
        .build()
        .unwrap();

    let mut file = tempfile::tempfile().unwrap();
    settings.write_to_file(&mut file).unwrap();
    file.seek(SeekFrom::Start(0)).unwrap();
    let settings2 = DefaultSettings::<f64>::read_from_file(&mut file).unwrap();

    assert_eq!(settings, settings2);
    assert_eq!(settings2.time_limit, f64::INFINITY);
}

#[test]
fn test_json_read_invalid() {
    use std::io::{Seek, SeekFrom};

    let mut file = tempfile::tempfile().unwrap();
    file.write_all(br#"{ "barrier_mu": 0.5 }"#).unwrap();
    file.seek(SeekFrom::Start(0)).unwrap();

    let err = DefaultSettings::<f64>::read_from_file(&mut file).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::InvalidData);
}
