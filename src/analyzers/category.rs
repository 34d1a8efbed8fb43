/// Converts a PM2.5 concentration (µg/m³) into its US EPA AQI category.
///
/// | Range (µg/m³)  | Category                       |
/// |----------------|--------------------------------|
/// | <= 9.0         | Good                           |
/// | <= 35.4        | Moderate                       |
/// | <= 55.4        | Unhealthy for Sensitive Groups |
/// | <= 125.4       | Unhealthy                      |
/// | <= 225.4       | Very Unhealthy                 |
/// | > 225.4        | Hazardous                      |
pub fn pm25_category(pm25: f64) -> &'static str {
    match pm25 {
        p if p <= 9.0 => "Good",
        p if p <= 35.4 => "Moderate",
        p if p <= 55.4 => "Unhealthy for Sensitive Groups",
        p if p <= 125.4 => "Unhealthy",
        p if p <= 225.4 => "Very Unhealthy",
        _ => "Hazardous",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_boundaries() {
        assert_eq!(pm25_category(0.0), "Good");
        assert_eq!(pm25_category(9.0), "Good");
        assert_eq!(pm25_category(9.1), "Moderate");
        assert_eq!(pm25_category(35.4), "Moderate");
        assert_eq!(pm25_category(35.5), "Unhealthy for Sensitive Groups");
        assert_eq!(pm25_category(55.4), "Unhealthy for Sensitive Groups");
        assert_eq!(pm25_category(55.5), "Unhealthy");
        assert_eq!(pm25_category(125.4), "Unhealthy");
        assert_eq!(pm25_category(125.5), "Very Unhealthy");
        assert_eq!(pm25_category(225.4), "Very Unhealthy");
        assert_eq!(pm25_category(225.5), "Hazardous");
    }
}
