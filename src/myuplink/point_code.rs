use std::fmt::Display;

/// Device points of the Hiax Connected 200 used by the adapter.
#[derive(PartialEq, Eq, Hash, Debug, Clone, Copy)]
pub enum PointCode {
    AmbientTemperature,
    InletTemperature,
    EnergyStored,
    EnergyTotal,
    EstimatedPower,
    FillLevel,
    HeaterMode,
    LegionellaFrequency,
    MaxWaterFlow,
    RegulationDiff,
    RequestedPower,
    RequestedTemperature,
    MeasuredTemperature,
}

impl PointCode {
    pub fn code(&self) -> &'static str {
        match self {
            PointCode::AmbientTemperature => "100",
            PointCode::InletTemperature => "101",
            PointCode::EnergyStored => "302",
            PointCode::EnergyTotal => "303",
            PointCode::EstimatedPower => "400",
            PointCode::FillLevel => "404",
            PointCode::HeaterMode => "500",
            PointCode::LegionellaFrequency => "511",
            PointCode::MaxWaterFlow => "512",
            PointCode::RegulationDiff => "516",
            PointCode::RequestedPower => "517",
            PointCode::RequestedTemperature => "527",
            PointCode::MeasuredTemperature => "528",
        }
    }

    /// Comma separated list as used by the `parameters` query parameter.
    pub fn join(codes: &[PointCode]) -> String {
        codes.iter().map(PointCode::code).collect::<Vec<_>>().join(",")
    }
}

impl Display for PointCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}
