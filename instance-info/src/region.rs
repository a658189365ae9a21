use phf::phf_map;

/// Timezone reported when the region is not in [`REGION_TIMEZONES`]
pub const DEFAULT_TIMEZONE: &str = "UTC";

/// Display timezone for each known AWS region
///
/// `eu-central-1` and `ap-south-1` report `Europe/Frankfurt` and `Asia/Mumbai`.
/// These are not canonical IANA names but consumers already depend on them.
pub static REGION_TIMEZONES: phf::Map<&'static str, &'static str> = phf_map! {
  "us-east-1" => "America/New_York",
  "us-east-2" => "America/New_York",
  "us-west-1" => "America/Los_Angeles",
  "us-west-2" => "America/Los_Angeles",
  "eu-west-1" => "Europe/Dublin",
  "eu-west-2" => "Europe/London",
  "eu-central-1" => "Europe/Frankfurt",
  "ap-southeast-1" => "Asia/Singapore",
  "ap-southeast-2" => "Australia/Sydney",
  "ap-south-1" => "Asia/Mumbai",
  "ap-northeast-1" => "Asia/Tokyo",
  "ap-northeast-2" => "Asia/Seoul",
  "sa-east-1" => "America/Sao_Paulo",
  "ca-central-1" => "America/Toronto",
};

/// Resolve the display timezone for a region
///
/// Exact, case-sensitive match; anything else falls back to `UTC`
pub fn timezone(region: &str) -> &'static str {
  REGION_TIMEZONES.get(region).copied().unwrap_or(DEFAULT_TIMEZONE)
}
