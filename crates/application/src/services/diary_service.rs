//! 医患关联工作流与症状日记。
//!
//! 关联状态机：患者发起 pending，医生 accept/reject 后终态；
//! 状态变更作为副作用产生通知，通知失败不回滚状态。

use std::sync::Arc;

use domain::{
    BodyPart, DomainError, LinkAction, LinkId, NewLink, NewNote, Note, UserId, BODY_PARTS,
};
use tracing::error;

use crate::{
    dto::{DoctorLinkDto, NoteDto, PatientLinkDto},
    error::ApplicationError,
    repository::{LinkRepository, NoteRepository, UserRepository},
    services::NotificationService,
};

/// 推送给医生的新关联请求文案。
const LINK_REQUESTED_MESSAGE: &str = "New link request";
/// 推送给患者的关联响应文案。
const LINK_RESPONDED_MESSAGE: &str = "Link request response";

#[derive(Debug, Clone)]
pub struct CreateNoteRequest {
    pub intensity: i32,
    pub pain_type: String,
    pub took_prescription: bool,
    pub description: String,
    pub body_part: i32,
}

pub struct DiaryServiceDependencies {
    pub link_repository: Arc<dyn LinkRepository>,
    pub note_repository: Arc<dyn NoteRepository>,
    pub user_repository: Arc<dyn UserRepository>,
    pub notifications: Arc<NotificationService>,
}

pub struct DiaryService {
    deps: DiaryServiceDependencies,
}

impl DiaryService {
    pub fn new(deps: DiaryServiceDependencies) -> Self {
        Self { deps }
    }

    /// 患者向医生发起关联请求。医生不存在则失败且不落任何行；
    /// 重复请求不去重，允许多条 pending 并存。
    pub async fn request_link(
        &self,
        patient_id: UserId,
        doctor_username: &str,
    ) -> Result<PatientLinkDto, ApplicationError> {
        let doctor = self
            .deps
            .user_repository
            .find_doctor_by_username(doctor_username)
            .await?
            .ok_or(DomainError::DoctorNotFound)?;

        let link = self
            .deps
            .link_repository
            .create(NewLink {
                doctor_id: doctor.id,
                patient_id,
            })
            .await?;

        if let Err(err) = self
            .deps
            .notifications
            .create(doctor.id, LINK_REQUESTED_MESSAGE)
            .await
        {
            error!(
                doctor_id = %doctor.id,
                %patient_id,
                error = %err,
                "failed to create link-request notification"
            );
        }

        Ok(PatientLinkDto::from_link(&link, &doctor))
    }

    /// 医生响应关联请求。动作在进入状态机前解析，
    /// 非法动作直接拒绝且不触碰已有关联。
    pub async fn respond_to_link(
        &self,
        doctor_id: UserId,
        patient_id: UserId,
        action: &str,
    ) -> Result<(), ApplicationError> {
        let action = LinkAction::parse(action)?;

        let mut link = self
            .deps
            .link_repository
            .find_by_doctor_and_patient(doctor_id, patient_id)
            .await?
            .ok_or(DomainError::LinkNotFound)?;

        link.respond(action);
        self.deps.link_repository.update(link).await?;

        if let Err(err) = self
            .deps
            .notifications
            .create(patient_id, LINK_RESPONDED_MESSAGE)
            .await
        {
            error!(
                %doctor_id,
                %patient_id,
                error = %err,
                "failed to create link-response notification"
            );
        }

        Ok(())
    }

    /// 按关联 ID 更新诊断。不校验关联状态，pending/rejected 同样可写。
    pub async fn set_diagnosis(
        &self,
        link_id: LinkId,
        diagnosis: String,
    ) -> Result<(), ApplicationError> {
        let mut link = self
            .deps
            .link_repository
            .find_by_id(link_id)
            .await?
            .ok_or(DomainError::LinkNotFound)?;
        link.diagnosis = diagnosis;
        self.deps.link_repository.update(link).await?;
        Ok(())
    }

    /// 按关联 ID 更新处方。与诊断一样不做状态校验。
    pub async fn set_prescription(
        &self,
        link_id: LinkId,
        prescription: String,
    ) -> Result<(), ApplicationError> {
        let mut link = self
            .deps
            .link_repository
            .find_by_id(link_id)
            .await?
            .ok_or(DomainError::LinkNotFound)?;
        link.prescription = prescription;
        self.deps.link_repository.update(link).await?;
        Ok(())
    }

    /// 患者视角的关联列表：仅 accepted；为空时返回占位条目而不是空集合。
    pub async fn patient_links(
        &self,
        patient_id: UserId,
    ) -> Result<Vec<PatientLinkDto>, ApplicationError> {
        let links = self
            .deps
            .link_repository
            .list_accepted_for_patient(patient_id)
            .await?;

        if links.is_empty() {
            return Ok(vec![PatientLinkDto::none()]);
        }

        Ok(links
            .iter()
            .map(|(link, doctor)| PatientLinkDto::from_link(link, doctor))
            .collect())
    }

    /// 医生视角的关联列表：全部状态；为空时同样返回占位条目。
    pub async fn doctor_links(
        &self,
        doctor_id: UserId,
    ) -> Result<Vec<DoctorLinkDto>, ApplicationError> {
        let links = self.deps.link_repository.list_for_doctor(doctor_id).await?;

        if links.is_empty() {
            return Ok(vec![DoctorLinkDto::none()]);
        }

        Ok(links
            .iter()
            .map(|(link, patient)| DoctorLinkDto::from_link(link, patient))
            .collect())
    }

    /// 新建日记条目。patient_id 取自认证上下文，请求体里的任何
    /// 患者标识都不采信。
    pub async fn create_note(
        &self,
        patient_id: UserId,
        request: CreateNoteRequest,
    ) -> Result<Note, ApplicationError> {
        let note = self
            .deps
            .note_repository
            .create(NewNote {
                patient_id,
                intensity: request.intensity,
                pain_type: request.pain_type,
                took_prescription: request.took_prescription,
                description: request.description,
                body_part: request.body_part,
            })
            .await?;
        Ok(note)
    }

    /// 日记列表为空时就是空集合，没有关联列表那样的占位条目。
    pub async fn patient_notes(
        &self,
        patient_id: UserId,
    ) -> Result<Vec<NoteDto>, ApplicationError> {
        let notes = self
            .deps
            .note_repository
            .list_for_patient(patient_id)
            .await?;
        Ok(notes.iter().map(NoteDto::from).collect())
    }

    pub fn body_parts(&self) -> &'static [BodyPart] {
        BODY_PARTS
    }
}
