//! レシート確認フォームのセッション状態
//!
//! 画面は2状態のみ:
//! - `View::AwaitingUpload`: 画像選択とアップロード
//! - `View::ReviewingReceipt`: 画像表示と明細編集
//!
//! 各操作は純粋な状態遷移。通信・ダウンロード・クリップボードは
//! 呼び出し側（CLI / WASM）が担当する。
//!
//! `F` は選択ファイルのハンドル型（CLIはファイル内容、WASMは `web_sys::File`）

use crate::error::SessionError;
use crate::types::{ExtractionResponse, ItemField, LineItem};
use std::future::Future;

/// ファイル未選択でアップロードしたときの表示メッセージ
pub const NO_FILE_MESSAGE: &str = "Please select a file first";

/// サーバーがエラーメッセージを返さなかったときの表示メッセージ
pub const GENERIC_FAILURE_MESSAGE: &str = "Error processing receipt";

/// アップロード画面の状態
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadForm<F> {
    pub selected_file: Option<F>,
    pub is_loading: bool,
    pub error_message: Option<String>,
}

impl<F> Default for UploadForm<F> {
    fn default() -> Self {
        Self {
            selected_file: None,
            is_loading: false,
            error_message: None,
        }
    }
}

/// 確認画面の状態
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Receipt {
    /// `<オリジン> + <サーバーが返した相対パス>`
    pub image_url: String,
    pub vendor: String,
    pub items: Vec<LineItem>,
}

impl Receipt {
    /// 抽出結果から確認画面の状態を組み立てる
    pub fn from_response(response: ExtractionResponse, origin: &str) -> Self {
        Self {
            image_url: format!("{}{}", origin, response.image_url),
            vendor: response.vendor,
            items: response.items,
        }
    }

    fn check_index(&self, index: usize) -> Result<(), SessionError> {
        if index < self.items.len() {
            Ok(())
        } else {
            Err(SessionError::ItemOutOfRange {
                index,
                len: self.items.len(),
            })
        }
    }
}

/// 画面状態
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View<F> {
    AwaitingUpload(UploadForm<F>),
    ReviewingReceipt(Receipt),
}

/// アップロード失敗
///
/// 通信エラー・非2xx応答のどちらも同じ扱い。
/// サーバーが `{ "error": ... }` を返した場合のみメッセージを持つ。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadFailure {
    pub server_message: Option<String>,
}

impl UploadFailure {
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            server_message: Some(message.into()),
        }
    }

    /// 画面に表示するメッセージ
    pub fn message(&self) -> &str {
        self.server_message
            .as_deref()
            .filter(|m| !m.is_empty())
            .unwrap_or(GENERIC_FAILURE_MESSAGE)
    }
}

/// セッション全体
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session<F> {
    view: View<F>,
}

impl<F> Default for Session<F> {
    fn default() -> Self {
        Self {
            view: View::AwaitingUpload(UploadForm::default()),
        }
    }
}

impl<F> Session<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> &View<F> {
        &self.view
    }

    pub fn is_reviewing(&self) -> bool {
        matches!(self.view, View::ReviewingReceipt(_))
    }

    pub fn upload_form(&self) -> Option<&UploadForm<F>> {
        match &self.view {
            View::AwaitingUpload(form) => Some(form),
            View::ReviewingReceipt(_) => None,
        }
    }

    pub fn receipt(&self) -> Option<&Receipt> {
        match &self.view {
            View::ReviewingReceipt(receipt) => Some(receipt),
            View::AwaitingUpload(_) => None,
        }
    }

    /// 確認画面のときだけ値を持つ
    pub fn image_url(&self) -> Option<&str> {
        self.receipt().map(|r| r.image_url.as_str())
    }

    pub fn is_loading(&self) -> bool {
        self.upload_form().is_some_and(|f| f.is_loading)
    }

    pub fn error_message(&self) -> Option<&str> {
        self.upload_form().and_then(|f| f.error_message.as_deref())
    }

    fn form_mut(&mut self) -> Result<&mut UploadForm<F>, SessionError> {
        match &mut self.view {
            View::AwaitingUpload(form) => Ok(form),
            View::ReviewingReceipt(_) => Err(SessionError::NotAwaitingUpload),
        }
    }

    fn receipt_mut(&mut self) -> Result<&mut Receipt, SessionError> {
        match &mut self.view {
            View::ReviewingReceipt(receipt) => Ok(receipt),
            View::AwaitingUpload(_) => Err(SessionError::NotReviewing),
        }
    }

    /// 画像を選択する（エラー表示は消える）
    pub fn select_file(&mut self, file: F) -> Result<(), SessionError> {
        let form = self.form_mut()?;
        form.selected_file = Some(file);
        form.error_message = None;
        Ok(())
    }

    /// アップロード開始
    ///
    /// ファイル未選択なら `NO_FILE_MESSAGE` を表示して `NoFileSelected`。
    /// 成功時はローディング状態に入り、送信するファイルを返す。
    pub fn begin_submit(&mut self) -> Result<F, SessionError>
    where
        F: Clone,
    {
        let form = self.form_mut()?;
        if form.is_loading {
            return Err(SessionError::SubmitInFlight);
        }
        let Some(file) = form.selected_file.clone() else {
            form.error_message = Some(NO_FILE_MESSAGE.to_string());
            return Err(SessionError::NoFileSelected);
        };
        form.is_loading = true;
        form.error_message = None;
        Ok(file)
    }

    /// アップロード完了
    ///
    /// 成功・失敗いずれでもローディング状態を抜ける。
    /// 成功なら確認画面へ、失敗ならアップロード画面のままエラーを表示。
    pub fn finish_submit(
        &mut self,
        outcome: Result<ExtractionResponse, UploadFailure>,
        origin: &str,
    ) -> Result<(), SessionError> {
        let form = self.form_mut()?;
        form.is_loading = false;
        match outcome {
            Ok(response) => {
                self.view = View::ReviewingReceipt(Receipt::from_response(response, origin));
            }
            Err(failure) => {
                form.error_message = Some(failure.message().to_string());
            }
        }
        Ok(())
    }

    /// アップロードを一括実行（開始 → 送信 → 完了）
    ///
    /// `upload` が返すまでの間だけローディング状態になる。
    pub async fn submit_with<Fut>(
        &mut self,
        origin: &str,
        upload: impl FnOnce(F) -> Fut,
    ) -> Result<(), SessionError>
    where
        F: Clone,
        Fut: Future<Output = Result<ExtractionResponse, UploadFailure>>,
    {
        let file = self.begin_submit()?;
        let outcome = upload(file).await;
        self.finish_submit(outcome, origin)
    }

    pub fn set_vendor_name(&mut self, vendor: impl Into<String>) -> Result<(), SessionError> {
        self.receipt_mut()?.vendor = vendor.into();
        Ok(())
    }

    pub fn edit_item(
        &mut self,
        index: usize,
        field: ItemField,
        value: impl Into<String>,
    ) -> Result<(), SessionError> {
        let receipt = self.receipt_mut()?;
        receipt.check_index(index)?;
        receipt.items[index].set_field(field, value);
        Ok(())
    }

    /// 末尾に既定値の明細を追加し、その位置を返す
    pub fn add_item(&mut self) -> Result<usize, SessionError> {
        let receipt = self.receipt_mut()?;
        receipt.items.push(LineItem::default());
        Ok(receipt.items.len() - 1)
    }

    /// 指定位置の明細を削除（残りの順序は保たれる）
    pub fn delete_item(&mut self, index: usize) -> Result<LineItem, SessionError> {
        let receipt = self.receipt_mut()?;
        receipt.check_index(index)?;
        Ok(receipt.items.remove(index))
    }

    /// 全状態を破棄して初期のアップロード画面に戻る
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: &str = "http://localhost:5000";

    fn sample_response() -> ExtractionResponse {
        ExtractionResponse {
            vendor: "Store A".to_string(),
            items: vec![
                LineItem::new("1", "Milk", "100", "3.50"),
                LineItem::new("2", "Bread", "200", "2.00"),
                LineItem::new("1", "Eggs", "300", "4.25"),
            ],
            image_url: "/uploads/receipt.jpg".to_string(),
        }
    }

    fn reviewing_session() -> Session<String> {
        let mut session = Session::new();
        session.select_file("receipt.jpg".to_string()).unwrap();
        session.begin_submit().unwrap();
        session.finish_submit(Ok(sample_response()), ORIGIN).unwrap();
        session
    }

    #[test]
    fn test_initial_state() {
        let session: Session<String> = Session::new();
        assert!(!session.is_reviewing());
        assert!(!session.is_loading());
        assert_eq!(session.image_url(), None);
        assert_eq!(session.error_message(), None);
        assert_eq!(session.upload_form().unwrap().selected_file, None);
    }

    #[test]
    fn test_submit_without_file_sets_validation_message() {
        let mut session: Session<String> = Session::new();
        let result = session.begin_submit();
        assert_eq!(result, Err(SessionError::NoFileSelected));
        assert_eq!(session.error_message(), Some(NO_FILE_MESSAGE));
        assert!(!session.is_loading());
    }

    #[test]
    fn test_select_file_clears_error() {
        let mut session: Session<String> = Session::new();
        let _ = session.begin_submit();
        session.select_file("a.jpg".to_string()).unwrap();
        assert_eq!(session.error_message(), None);
        assert_eq!(
            session.upload_form().unwrap().selected_file.as_deref(),
            Some("a.jpg")
        );
    }

    #[test]
    fn test_begin_submit_enters_loading_and_refuses_reentry() {
        let mut session: Session<String> = Session::new();
        session.select_file("a.jpg".to_string()).unwrap();
        assert_eq!(session.begin_submit(), Ok("a.jpg".to_string()));
        assert!(session.is_loading());
        assert_eq!(session.begin_submit(), Err(SessionError::SubmitInFlight));
    }

    #[test]
    fn test_successful_submit_switches_to_review() {
        let session = reviewing_session();
        assert!(session.is_reviewing());
        assert!(!session.is_loading());
        assert_eq!(
            session.image_url(),
            Some("http://localhost:5000/uploads/receipt.jpg")
        );
        let receipt = session.receipt().unwrap();
        assert_eq!(receipt.vendor, "Store A");
        assert_eq!(receipt.items.len(), 3);
    }

    #[test]
    fn test_failed_submit_with_server_message() {
        let mut session: Session<String> = Session::new();
        session.select_file("a.jpg".to_string()).unwrap();
        session.begin_submit().unwrap();
        session
            .finish_submit(Err(UploadFailure::with_message("bad image")), ORIGIN)
            .unwrap();

        assert!(!session.is_reviewing());
        assert!(!session.is_loading());
        assert_eq!(session.error_message(), Some("bad image"));
        // ファイルは選択されたまま（再試行できる）
        assert!(session.upload_form().unwrap().selected_file.is_some());
    }

    #[test]
    fn test_failed_submit_without_server_message() {
        let mut session: Session<String> = Session::new();
        session.select_file("a.jpg".to_string()).unwrap();
        session.begin_submit().unwrap();
        session.finish_submit(Err(UploadFailure::default()), ORIGIN).unwrap();
        assert_eq!(session.error_message(), Some(GENERIC_FAILURE_MESSAGE));
    }

    #[test]
    fn test_empty_server_message_falls_back() {
        assert_eq!(UploadFailure::with_message("").message(), GENERIC_FAILURE_MESSAGE);
    }

    #[test]
    fn test_retry_clears_previous_error() {
        let mut session: Session<String> = Session::new();
        session.select_file("a.jpg".to_string()).unwrap();
        session.begin_submit().unwrap();
        session.finish_submit(Err(UploadFailure::default()), ORIGIN).unwrap();
        session.begin_submit().unwrap();
        assert_eq!(session.error_message(), None);
        assert!(session.is_loading());
    }

    #[tokio::test]
    async fn test_submit_with_never_runs_upload_without_file() {
        let mut session: Session<String> = Session::new();
        let mut called = false;
        let result = session
            .submit_with(ORIGIN, |_| {
                called = true;
                async { Ok(sample_response()) }
            })
            .await;
        assert_eq!(result, Err(SessionError::NoFileSelected));
        assert!(!called);
    }

    #[tokio::test]
    async fn test_submit_with_success() {
        let mut session: Session<String> = Session::new();
        session.select_file("a.jpg".to_string()).unwrap();
        session
            .submit_with(ORIGIN, |file| async move {
                assert_eq!(file, "a.jpg");
                Ok(sample_response())
            })
            .await
            .unwrap();
        assert!(session.is_reviewing());
        assert!(!session.is_loading());
    }

    #[test]
    fn test_add_item_appends_default() {
        let mut session = reviewing_session();
        let index = session.add_item().unwrap();
        let items = &session.receipt().unwrap().items;
        assert_eq!(index, 3);
        assert_eq!(items.len(), 4);
        assert_eq!(items[3], LineItem::new("1", "", "", "0.00"));
    }

    #[test]
    fn test_delete_item_preserves_others() {
        let mut session = reviewing_session();
        let removed = session.delete_item(1).unwrap();
        assert_eq!(removed.name, "Bread");
        let items = &session.receipt().unwrap().items;
        assert_eq!(
            items,
            &vec![
                LineItem::new("1", "Milk", "100", "3.50"),
                LineItem::new("1", "Eggs", "300", "4.25"),
            ]
        );
    }

    #[test]
    fn test_edit_item_changes_only_one_field() {
        let mut session = reviewing_session();
        let before = session.receipt().unwrap().clone();
        session.edit_item(0, ItemField::Price, "3.75").unwrap();

        let after = session.receipt().unwrap();
        assert_eq!(after.items[0], LineItem::new("1", "Milk", "100", "3.75"));
        assert_eq!(after.items[1..], before.items[1..]);
        assert_eq!(after.vendor, before.vendor);
        assert_eq!(after.image_url, before.image_url);
    }

    #[test]
    fn test_out_of_range_index_fails_fast() {
        let mut session = reviewing_session();
        assert_eq!(
            session.edit_item(3, ItemField::Name, "x"),
            Err(SessionError::ItemOutOfRange { index: 3, len: 3 })
        );
        assert_eq!(
            session.delete_item(9),
            Err(SessionError::ItemOutOfRange { index: 9, len: 3 })
        );
        assert_eq!(session.receipt().unwrap().items.len(), 3);
    }

    #[test]
    fn test_set_vendor_name() {
        let mut session = reviewing_session();
        session.set_vendor_name("Corner Shop").unwrap();
        assert_eq!(session.receipt().unwrap().vendor, "Corner Shop");
    }

    #[test]
    fn test_mode_mismatch() {
        let mut upload: Session<String> = Session::new();
        assert_eq!(upload.add_item(), Err(SessionError::NotReviewing));
        assert_eq!(upload.set_vendor_name("x"), Err(SessionError::NotReviewing));

        let mut review = reviewing_session();
        assert_eq!(
            review.select_file("b.jpg".to_string()),
            Err(SessionError::NotAwaitingUpload)
        );
        assert_eq!(review.begin_submit(), Err(SessionError::NotAwaitingUpload));
    }

    #[test]
    fn test_reset_returns_to_initial() {
        let mut session = reviewing_session();
        session.reset();
        assert_eq!(session, Session::new());
    }
}
