/// 业务错误码
///
/// 按领域分段：1xxx 通用，2xxx 用户，3xxx 课程，4xxx 题目，5xxx 提交，6xxx Blob 存储。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用
    BadRequest = 1000,
    ValidationFailed = 1001,
    PermissionDenied = 1003,
    NotFound = 1004,
    RateLimitExceeded = 1029,
    InternalServerError = 1500,

    // 用户
    UserNotFound = 2004,

    // 课程
    CourseMembershipUpdateFailed = 3001,
    CourseNotFound = 3004,

    // 题目
    QuestionNotFound = 4004,

    // 提交
    SubmissionCreateFailed = 5001,
    SubmissionNotFound = 5004,

    // Blob 存储
    BlobUploadFailed = 6001,
    BlobTooLarge = 6002,
    BlobNotFound = 6004,
}
