//! Fixed user-facing message set (Arabic)

pub const DEPARTURE_BEFORE_ARRIVAL: &str = "تاريخ المغادرة يجب أن يكون بعد تاريخ الوصول";

/// Custom-validity text attached to the phone input
pub const PHONE_INVALID_DETAIL: &str =
    "رقم التليجرام غير صحيح. يجب أن يبدأ بـ 01 ويتكون من 10-11 رقم";

/// Toast shown when the phone input loses focus with a bad value
pub const PHONE_INVALID: &str = "رقم التليجرام غير صحيح";

pub const FILE_TYPE_UNSUPPORTED: &str = "نوع الملف غير مدعوم. الأنواع المسموحة: PDF, Word, صور";

pub const FORM_INCOMPLETE: &str = "يرجى التأكد من ملء جميع الحقول المطلوبة بشكل صحيح";

pub const SUBMITTING: &str = "جاري الإرسال...";

pub fn file_selected(name: &str) -> String {
    format!("تم اختيار الملف: {}", name)
}

pub fn stay_too_long(max_nights: i64) -> String {
    format!("مدة الإقامة لا يمكن أن تزيد عن {} يوماً", max_nights)
}

pub fn file_too_large(max_bytes: u64) -> String {
    format!(
        "حجم الملف كبير جداً. الحد الأقصى {} ميجابايت",
        max_bytes / (1024 * 1024)
    )
}
