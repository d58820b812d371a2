use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::Question;
use crate::models::courses::entities::Course;
use crate::models::submissions::entities::Submission;

/// 题目页所需的全部数据：题目本身、所属课程、当前用户的提交
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/question.ts")]
pub struct QuestionDetail {
    #[serde(flatten)]
    #[ts(flatten)]
    pub question: Question,
    pub course: Course,
    pub submissions: Vec<Submission>,
}
