//! Exif tag vocabulary.
//!
//! IFD0, the Exif SubIFD, thumbnail and multi-page image directories all
//! share one tag space; GPS and Interoperability IFDs have their own.

// =============================================================================
// Pointer and structural tags
// =============================================================================

/// Zero-length tag emitted by some writers; carries no data
pub const TAG_EMPTY: u16 = 0x0000;

pub const TAG_INTEROP_INDEX: u16 = 0x0001;
pub const TAG_INTEROP_VERSION: u16 = 0x0002;

pub const TAG_NEW_SUBFILE_TYPE: u16 = 0x00FE;
pub const TAG_IMAGE_WIDTH: u16 = 0x0100;
pub const TAG_IMAGE_HEIGHT: u16 = 0x0101;
pub const TAG_COMPRESSION: u16 = 0x0103;
pub const TAG_IMAGE_DESCRIPTION: u16 = 0x010E;
pub const TAG_MAKE: u16 = 0x010F;
pub const TAG_MODEL: u16 = 0x0110;
pub const TAG_ORIENTATION: u16 = 0x0112;
pub const TAG_X_RESOLUTION: u16 = 0x011A;
pub const TAG_Y_RESOLUTION: u16 = 0x011B;
pub const TAG_PAGE_NUMBER: u16 = 0x0129;
pub const TAG_SOFTWARE: u16 = 0x0131;
pub const TAG_DATETIME: u16 = 0x0132;

/// Array of offsets to child image IFDs (TIFF 6.0 SubIFDs)
pub const TAG_SUB_IFD_OFFSET: u16 = 0x014A;

pub const TAG_THUMBNAIL_OFFSET: u16 = 0x0201;
pub const TAG_THUMBNAIL_LENGTH: u16 = 0x0202;

pub const TAG_EXIF_SUB_IFD_OFFSET: u16 = 0x8769;
pub const TAG_GPS_INFO_OFFSET: u16 = 0x8825;
pub const TAG_INTEROP_OFFSET: u16 = 0xA005;
pub const TAG_MAKERNOTE: u16 = 0x927C;

pub const TAG_EXPOSURE_TIME: u16 = 0x829A;
pub const TAG_FNUMBER: u16 = 0x829D;
pub const TAG_ISO_EQUIVALENT: u16 = 0x8827;
pub const TAG_DATETIME_ORIGINAL: u16 = 0x9003;
pub const TAG_FOCAL_LENGTH: u16 = 0x920A;
pub const TAG_USER_COMMENT: u16 = 0x9286;

pub const TAG_GPS_VERSION_ID: u16 = 0x0000;
pub const TAG_GPS_LATITUDE_REF: u16 = 0x0001;
pub const TAG_GPS_LATITUDE: u16 = 0x0002;
pub const TAG_GPS_LONGITUDE_REF: u16 = 0x0003;
pub const TAG_GPS_LONGITUDE: u16 = 0x0004;

// =============================================================================
// Name tables
// =============================================================================

/// Tags shared by IFD0, the Exif SubIFD, thumbnails and page images.
pub static EXIF_TAG_NAMES: &[(u32, &str)] = &[
    (0x0001, "Interoperability Index"),
    (0x0002, "Interoperability Version"),
    (0x000B, "Processing Software"),
    (0x00FE, "New Subfile Type"),
    (0x00FF, "Subfile Type"),
    (0x0100, "Image Width"),
    (0x0101, "Image Height"),
    (0x0102, "Bits Per Sample"),
    (0x0103, "Compression"),
    (0x0106, "Photometric Interpretation"),
    (0x0107, "Thresholding"),
    (0x010A, "Fill Order"),
    (0x010D, "Document Name"),
    (0x010E, "Image Description"),
    (0x010F, "Make"),
    (0x0110, "Model"),
    (0x0111, "Strip Offsets"),
    (0x0112, "Orientation"),
    (0x0115, "Samples Per Pixel"),
    (0x0116, "Rows Per Strip"),
    (0x0117, "Strip Byte Counts"),
    (0x0118, "Minimum Sample Value"),
    (0x0119, "Maximum Sample Value"),
    (0x011A, "X Resolution"),
    (0x011B, "Y Resolution"),
    (0x011C, "Planar Configuration"),
    (0x011D, "Page Name"),
    (0x0128, "Resolution Unit"),
    (0x0129, "Page Number"),
    (0x012D, "Transfer Function"),
    (0x0131, "Software"),
    (0x0132, "Date/Time"),
    (0x013B, "Artist"),
    (0x013C, "Host Computer"),
    (0x013D, "Predictor"),
    (0x013E, "White Point"),
    (0x013F, "Primary Chromaticities"),
    (0x0142, "Tile Width"),
    (0x0143, "Tile Length"),
    (0x0144, "Tile Offsets"),
    (0x0145, "Tile Byte Counts"),
    (0x014A, "Sub IFD Pointer(s)"),
    (0x0153, "Sample Format"),
    (0x0201, "Thumbnail Offset"),
    (0x0202, "Thumbnail Length"),
    (0x0211, "YCbCr Coefficients"),
    (0x0212, "YCbCr Sub-Sampling"),
    (0x0213, "YCbCr Positioning"),
    (0x0214, "Reference Black/White"),
    (0x02BC, "XMP"),
    (0x4746, "Rating"),
    (0x4749, "Rating Percent"),
    (0x8298, "Copyright"),
    (0x829A, "Exposure Time"),
    (0x829D, "F-Number"),
    (0x83BB, "IPTC/NAA"),
    (0x8769, "Exif SubIFD Pointer"),
    (0x8773, "Inter Color Profile"),
    (0x8822, "Exposure Program"),
    (0x8824, "Spectral Sensitivity"),
    (0x8825, "GPS Info Pointer"),
    (0x8827, "ISO Speed Ratings"),
    (0x8828, "Opto-electric Conversion Function (OECF)"),
    (0x8830, "Sensitivity Type"),
    (0x8832, "Recommended Exposure Index"),
    (0x9000, "Exif Version"),
    (0x9003, "Date/Time Original"),
    (0x9004, "Date/Time Digitized"),
    (0x9010, "Time Zone"),
    (0x9011, "Time Zone Original"),
    (0x9012, "Time Zone Digitized"),
    (0x9101, "Components Configuration"),
    (0x9102, "Compressed Bits Per Pixel"),
    (0x9201, "Shutter Speed Value"),
    (0x9202, "Aperture Value"),
    (0x9203, "Brightness Value"),
    (0x9204, "Exposure Bias Value"),
    (0x9205, "Max Aperture Value"),
    (0x9206, "Subject Distance"),
    (0x9207, "Metering Mode"),
    (0x9208, "White Balance"),
    (0x9209, "Flash"),
    (0x920A, "Focal Length"),
    (0x9214, "Subject Location"),
    (0x927C, "Makernote"),
    (0x9286, "User Comment"),
    (0x9290, "Sub-Sec Time"),
    (0x9291, "Sub-Sec Time Original"),
    (0x9292, "Sub-Sec Time Digitized"),
    (0x9C9B, "Windows XP Title"),
    (0x9C9C, "Windows XP Comment"),
    (0x9C9D, "Windows XP Author"),
    (0x9C9E, "Windows XP Keywords"),
    (0x9C9F, "Windows XP Subject"),
    (0xA000, "FlashPix Version"),
    (0xA001, "Color Space"),
    (0xA002, "Exif Image Width"),
    (0xA003, "Exif Image Height"),
    (0xA004, "Related Sound File"),
    (0xA005, "Interoperability Pointer"),
    (0xA20B, "Flash Energy"),
    (0xA20E, "Focal Plane X Resolution"),
    (0xA20F, "Focal Plane Y Resolution"),
    (0xA210, "Focal Plane Resolution Unit"),
    (0xA214, "Subject Location"),
    (0xA215, "Exposure Index"),
    (0xA217, "Sensing Method"),
    (0xA300, "File Source"),
    (0xA301, "Scene Type"),
    (0xA302, "CFA Pattern"),
    (0xA401, "Custom Rendered"),
    (0xA402, "Exposure Mode"),
    (0xA403, "White Balance Mode"),
    (0xA404, "Digital Zoom Ratio"),
    (0xA405, "Focal Length 35"),
    (0xA406, "Scene Capture Type"),
    (0xA407, "Gain Control"),
    (0xA408, "Contrast"),
    (0xA409, "Saturation"),
    (0xA40A, "Sharpness"),
    (0xA40B, "Device Setting Description"),
    (0xA40C, "Subject Distance Range"),
    (0xA420, "Unique Image ID"),
    (0xA430, "Camera Owner Name"),
    (0xA431, "Body Serial Number"),
    (0xA432, "Lens Specification"),
    (0xA433, "Lens Make"),
    (0xA434, "Lens Model"),
    (0xA435, "Lens Serial Number"),
    (0xA500, "Gamma"),
    (0xC4A5, "Print Image Matching (PIM) Info"),
    (0xC612, "DNG Version"),
    (0xC613, "DNG Backward Version"),
    (0xC614, "Unique Camera Model"),
];

pub static GPS_TAG_NAMES: &[(u32, &str)] = &[
    (0x0000, "GPS Version ID"),
    (0x0001, "GPS Latitude Ref"),
    (0x0002, "GPS Latitude"),
    (0x0003, "GPS Longitude Ref"),
    (0x0004, "GPS Longitude"),
    (0x0005, "GPS Altitude Ref"),
    (0x0006, "GPS Altitude"),
    (0x0007, "GPS Time-Stamp"),
    (0x0008, "GPS Satellites"),
    (0x0009, "GPS Status"),
    (0x000A, "GPS Measure Mode"),
    (0x000B, "GPS DOP"),
    (0x000C, "GPS Speed Ref"),
    (0x000D, "GPS Speed"),
    (0x000E, "GPS Track Ref"),
    (0x000F, "GPS Track"),
    (0x0010, "GPS Img Direction Ref"),
    (0x0011, "GPS Img Direction"),
    (0x0012, "GPS Map Datum"),
    (0x0013, "GPS Dest Latitude Ref"),
    (0x0014, "GPS Dest Latitude"),
    (0x0015, "GPS Dest Longitude Ref"),
    (0x0016, "GPS Dest Longitude"),
    (0x0017, "GPS Dest Bearing Ref"),
    (0x0018, "GPS Dest Bearing"),
    (0x0019, "GPS Dest Distance Ref"),
    (0x001A, "GPS Dest Distance"),
    (0x001B, "GPS Processing Method"),
    (0x001C, "GPS Area Information"),
    (0x001D, "GPS Date Stamp"),
    (0x001E, "GPS Differential"),
    (0x001F, "GPS H Positioning Error"),
];

pub static INTEROP_TAG_NAMES: &[(u32, &str)] = &[
    (0x0001, "Interoperability Index"),
    (0x0002, "Interoperability Version"),
    (0x1000, "Related Image File Format"),
    (0x1001, "Related Image Width"),
    (0x1002, "Related Image Height"),
];

/// Linear lookup in one of the name tables above.
pub fn lookup(table: &[(u32, &'static str)], tag: u32) -> Option<&'static str> {
    table
        .iter()
        .find(|(id, _)| *id == tag)
        .map(|(_, name)| *name)
}

// =============================================================================
// Tests
// =============================================================================
