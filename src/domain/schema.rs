//! Column names of the shelter & overnight service occupancy dataset.

pub const RAW_ID: &str = "_id";
pub const ID: &str = "ID";

pub const OCCUPANCY_DATE: &str = "OCCUPANCY_DATE";
pub const OCCUPANCY_MONTH: &str = "OCCUPANCY_MONTH";

pub const SECTOR: &str = "SECTOR";
pub const PROGRAM_MODEL: &str = "PROGRAM_MODEL";
pub const OVERNIGHT_SERVICE_TYPE: &str = "OVERNIGHT_SERVICE_TYPE";
pub const CAPACITY_TYPE: &str = "CAPACITY_TYPE";
pub const SERVICE_USER_COUNT: &str = "SERVICE_USER_COUNT";

pub const LOCATION_ID: &str = "LOCATION_ID";
pub const LOCATION_ADDRESS: &str = "LOCATION_ADDRESS";
pub const LOCATION_PROVINCE: &str = "LOCATION_PROVINCE";

pub const OCCUPANCY_RATE_BEDS: &str = "OCCUPANCY_RATE_BEDS";
pub const OCCUPANCY_RATE_ROOMS: &str = "OCCUPANCY_RATE_ROOMS";

/// Bed and room capacity/occupancy columns. These hold counts and are stored
/// as nullable integers after cleaning.
pub const COUNT_COLUMNS: [&str; 10] = [
    "CAPACITY_ACTUAL_BED",
    "CAPACITY_FUNDING_BED",
    "OCCUPIED_BEDS",
    "UNOCCUPIED_BEDS",
    "UNAVAILABLE_BEDS",
    "CAPACITY_ACTUAL_ROOM",
    "CAPACITY_FUNDING_ROOM",
    "OCCUPIED_ROOMS",
    "UNOCCUPIED_ROOMS",
    "UNAVAILABLE_ROOMS",
];

/// Text columns whose value counts / unique values are profiled.
pub const CATEGORICAL_COLUMNS: [&str; 5] = [
    SECTOR,
    PROGRAM_MODEL,
    OVERNIGHT_SERVICE_TYPE,
    LOCATION_ADDRESS,
    LOCATION_PROVINCE,
];

/// `PROGRAM_MODEL` value selected for the emergency subset.
pub const EMERGENCY_PROGRAM: &str = "Emergency";

/// Columns kept in the emergency subset, in output order.
pub const EMERGENCY_COLUMNS: [&str; 7] = [
    OCCUPANCY_DATE,
    SECTOR,
    PROGRAM_MODEL,
    SERVICE_USER_COUNT,
    CAPACITY_TYPE,
    OCCUPANCY_RATE_BEDS,
    OCCUPANCY_RATE_ROOMS,
];
