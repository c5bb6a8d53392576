pub const CONTAINER_LG: &str = "max-w-5xl mx-auto px-4 sm:px-6 lg:px-8 py-6";
pub const CARD: &str = "bg-white dark:bg-gray-800 rounded-lg shadow-lg p-6";
pub const CARD_ERROR: &str = "bg-red-50 dark:bg-red-900/50 border border-red-200 dark:border-red-800 rounded-lg p-4 text-red-700 dark:text-red-200";
pub const BUTTON_PRIMARY: &str = "inline-flex items-center justify-center px-4 py-2 rounded-lg font-medium text-white bg-gradient-to-r from-blue-600 to-blue-700 hover:from-blue-700 hover:to-blue-800 shadow-lg transition-all duration-300 disabled:opacity-50 disabled:cursor-not-allowed";
pub const BUTTON_SECONDARY: &str = "inline-flex items-center justify-center px-4 py-2 rounded-lg font-medium border border-gray-300 dark:border-gray-600 text-gray-900 dark:text-white hover:bg-gray-50 dark:hover:bg-gray-800 disabled:opacity-50 disabled:cursor-not-allowed";
pub const TAB_ACTIVE: &str = "px-3 py-1 rounded-lg bg-blue-500 text-white";
pub const TAB_INACTIVE: &str = "px-3 py-1 rounded-lg bg-gray-200 dark:bg-gray-700 text-gray-700 dark:text-gray-300";
pub const OVERLAY: &str = "fixed inset-0 z-50 flex items-center justify-center bg-black/60 backdrop-blur-sm";
pub const MODAL: &str = "bg-white dark:bg-gray-900 rounded-xl shadow-xl p-6 w-full max-w-md mx-4";
pub const PROGRESS_TRACK: &str = "w-full bg-gray-200 dark:bg-gray-700 rounded-full h-2.5";
pub const PROGRESS_BAR: &str = "bg-gradient-to-r from-blue-500 to-purple-600 h-2.5 rounded-full transition-all duration-500";
pub const TEXT_H1: &str = "text-3xl font-bold text-gray-900 dark:text-white";
pub const TEXT_H3: &str = "text-xl font-bold text-gray-900 dark:text-white";
pub const TEXT_BODY: &str = "text-gray-600 dark:text-gray-300";
pub const TEXT_SMALL: &str = "text-sm text-gray-500 dark:text-gray-400";
pub const TEXT_ERROR: &str = "text-sm text-red-500 dark:text-red-400";
pub const LOADING_SPINNER: &str = "animate-spin rounded-full h-8 w-8 border-b-2 border-blue-500";
