//! ABI bindings for the CertiChain ledger contract.

use alloy::sol;

sol! {
    /// Call interface of the CertiChain certificate registry.
    interface CertiChain {
        function issueCertificate(address student, string certificateHash, string institution) external payable;
        function requestCertificate(string certificateHash) external payable;
        function verifyCertificate(string certificateHash) external view returns (bool exists, address student, string institution, uint256 issuedAt);
        function certificateCount() external view returns (uint256 count);
        function admins(address account) external view returns (bool isAdmin);
        function issueFee() external view returns (uint256 fee);
        function requestFee() external view returns (uint256 fee);
    }
}
