use std::io::Write;

use crate::{core::sample::Sample, prelude::*};

/// Write the samples in the export shape: a `Timestamp,Watts` header, one
/// row per sample, timestamps as unix seconds.
pub fn write_csv(writer: impl Write, samples: &[Sample]) -> Result {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(["Timestamp", "Watts"])?;
    for sample in samples {
        writer
            .write_record([sample.timestamp.timestamp().to_string(), sample.power.0.to_string()])?;
    }
    writer.flush().context("failed to flush the export")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;

    use super::*;
    use crate::quantity::power::Watts;

    #[test]
    fn export_shape_ok() -> Result {
        let samples = [(995, 50.0), (996, 60.5)].map(|(timestamp, power)| Sample {
            timestamp: DateTime::from_timestamp(timestamp, 0).unwrap(),
            power: Watts(power),
        });
        let mut buffer = Vec::new();
        write_csv(&mut buffer, &samples)?;
        assert_eq!(String::from_utf8(buffer)?, "Timestamp,Watts\n995,50\n996,60.5\n");
        Ok(())
    }

    #[test]
    fn empty_export_is_just_the_header() -> Result {
        let mut buffer = Vec::new();
        write_csv(&mut buffer, &[])?;
        assert_eq!(String::from_utf8(buffer)?, "Timestamp,Watts\n");
        Ok(())
    }
}
