use crate::myuplink::point_code::PointCode;
use crate::myuplink::point_value::PointValue;
use serde::Deserialize;
use std::collections::HashMap;

// API: https://api.myuplink.com/swagger/index.html, GET /v2/devices/{deviceId}/points
#[allow(dead_code)]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointGet {
    pub parameter_id: String,
    pub parameter_name: Option<String>,
    pub parameter_unit: Option<String>,
    pub writable: Option<bool>,
    pub value: Option<PointValue>,
    pub str_val: Option<String>,
}

/// Point values of one read, looked up by code.
#[derive(PartialEq, Debug, Default)]
pub struct DevicePoints {
    values: HashMap<String, PointValue>,
}

impl DevicePoints {
    pub fn get(&self, code: PointCode) -> Option<&PointValue> {
        self.values.get(code.code())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }
}

impl FromIterator<PointGet> for DevicePoints {
    fn from_iter<T: IntoIterator<Item = PointGet>>(iter: T) -> Self {
        let values = iter
            .into_iter()
            .filter_map(|point| point.value.map(|value| (point.parameter_id, value)))
            .collect();

        DevicePoints { values }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn points_without_a_value_are_absent() -> Result<(), serde_json::Error> {
        let json = r#"[
            { "parameterId": "500", "parameterName": "Heater mode", "value": 8, "strVal": "External" },
            { "parameterId": "527", "parameterName": "Requested temperature", "value": null }
        ]"#;

        let points = serde_json::from_str::<Vec<PointGet>>(json)?.into_iter().collect::<DevicePoints>();

        assert_eq!(points.len(), 1);
        assert_eq!(points.get(PointCode::HeaterMode), Some(&PointValue::Integer(8)));
        assert_eq!(points.get(PointCode::RequestedTemperature), None);
        Ok(())
    }
}
