/// Column-name constants for the service-pressure schema.
/// Single source of truth for every stage of the pipeline.

// ── Region key columns ──────────────────────────────────────────────────────
pub mod region {
    pub const STATE: &str = "state";
    pub const DISTRICT: &str = "district";
    pub const PINCODE: &str = "pincode";
}

// ── Raw activity counters ───────────────────────────────────────────────────
pub mod activity {
    pub const TOTAL_ENROLMENTS: &str = "total_enrolments";
    pub const DEMO_ACTIVITY: &str = "demo_activity";
    pub const BIO_ACTIVITY: &str = "bio_activity";

    pub const CORE: [&str; 3] = [TOTAL_ENROLMENTS, DEMO_ACTIVITY, BIO_ACTIVITY];

    // Age-split counters keep the source system's trailing-underscore
    // spelling for the open-ended 17+ band.
    pub const DEMO_AGE_5_17: &str = "demo_age_5_17";
    pub const DEMO_AGE_17_PLUS: &str = "demo_age_17_";
    pub const BIO_AGE_5_17: &str = "bio_age_5_17";
    pub const BIO_AGE_17_PLUS: &str = "bio_age_17_";

    pub const DEMO_AGE_SPLIT: [&str; 2] = [DEMO_AGE_5_17, DEMO_AGE_17_PLUS];
    pub const BIO_AGE_SPLIT: [&str; 2] = [BIO_AGE_5_17, BIO_AGE_17_PLUS];
}

// ── Derived metric columns ──────────────────────────────────────────────────
pub mod metrics {
    pub const TOTAL_ACTIVITY: &str = "total_activity";
    pub const TOTAL_UPDATES: &str = "total_updates";
    pub const UPDATE_TO_ENROLMENT_RATIO: &str = "update_to_enrolment_ratio";
    pub const BIO_TO_ENROL_RATIO: &str = "bio_to_enrol_ratio";
    pub const DEMO_TO_ENROL_RATIO: &str = "demo_to_enrol_ratio";
    pub const TOTAL_MAINTENANCE_RATIO: &str = "total_maintenance_ratio";

    pub const ACTIVITY_5_17: &str = "activity_5_17";
    pub const ACTIVITY_17_PLUS: &str = "activity_17_plus";
    pub const TOTAL_UPDATE_ACTIVITY: &str = "total_update_activity";
    pub const AGE_17_PLUS_SHARE: &str = "age_17_plus_share";

    pub const DOMINANT_NEED: &str = "dominant_need";
}

// ── Dominant-need labels ────────────────────────────────────────────────────
pub mod need {
    pub const BIO_HEAVY: &str = "bio-heavy";
    pub const DEMO_HEAVY: &str = "demo-heavy";
}
